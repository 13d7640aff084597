use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default filter for a verbosity level (`-v` count).
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info,gosel_core=info",
        2 => "info,gosel_core=debug,gosel_cli=debug",
        _ => "debug,gosel_core=trace,gosel_cli=trace",
    }
}

/// Initializes console logging on stderr.
///
/// `RUST_LOG` takes precedence over the verbosity derived filter. Stdout is
/// left to the synthesized command and the test output.
pub fn init(verbosity: u8) -> Result<(), String> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .map_err(|e| format!("Failed to initialize logging: {e}"))
}
