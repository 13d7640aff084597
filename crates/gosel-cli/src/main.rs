use std::path::PathBuf;

use clap::{error::ErrorKind, CommandFactory, Parser};
use color_eyre::eyre::{eyre, WrapErr};
use gosel_core::{Config, FileHistory, RunMode, SessionOutcome, Target, TestSession};

mod exec;
mod tui;

/// Token that switches to debugger runs when given before the path.
const DEBUG_TOKEN: &str = "debug";

#[derive(Parser)]
#[command(name = "gosel")]
#[command(about = "Pick a Go test or testify suite method and run it", long_about = None)]
struct Cli {
    /// Optional `debug`, then a directory or test file (default: current directory)
    #[arg(value_name = "[debug] PATH", num_args = 0..=2)]
    args: Vec<String>,

    /// Config file (default: ./gosel.toml, then ~/.config/gosel/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the command instead of running it
    #[arg(long)]
    dry_run: bool,

    /// Print the default configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Split the positional arguments into run mode and path.
///
/// A second positional is only accepted after the `debug` token.
fn parse_target_args(args: &[String]) -> Result<(RunMode, Option<PathBuf>), String> {
    match args {
        [] => Ok((RunMode::Direct, None)),
        [first] if first == DEBUG_TOKEN => Ok((RunMode::Debug, None)),
        [first, path] if first == DEBUG_TOKEN => Ok((RunMode::Debug, Some(PathBuf::from(path)))),
        [path] => Ok((RunMode::Direct, Some(PathBuf::from(path)))),
        [path, extra, ..] => Err(format!(
            "unexpected argument '{}' after path '{}'; only `{}` may precede the path",
            extra, path, DEBUG_TOKEN
        )),
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    gosel_core::logging::init(cli.verbose).map_err(|e| eyre!(e))?;

    if cli.print_config {
        print!("{}", Config::default_config_string());
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .wrap_err_with(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load().wrap_err("Failed to load config")?,
    };

    let (mode, path) = match parse_target_args(&cli.args) {
        Ok(target) => target,
        Err(message) => Cli::command().error(ErrorKind::TooManyValues, message).exit(),
    };
    let working_dir = std::env::current_dir().wrap_err("Failed to read working directory")?;
    let target = Target::resolve(path.as_deref(), mode, &working_dir)?;
    tracing::debug!(dir = %target.dir.display(), file = ?target.file, %mode, "target");

    let mut history = FileHistory::with_config(&config.history);
    let mut widget = tui::TerminalWidget::new();
    let mut executor = exec::ShellExecutor::new();

    let outcome = TestSession::new(
        &config,
        &mut history,
        &mut widget,
        &mut executor,
        &working_dir,
    )
    .dry_run(cli.dry_run)
    .run(&target)?;

    match outcome {
        SessionOutcome::NoTests => println!("No tests found"),
        SessionOutcome::Cancelled => {}
        SessionOutcome::Printed { command, .. } => println!("{}", command),
        SessionOutcome::Ran { exit_code, .. } => match exit_code {
            Some(0) => {}
            Some(code) => std::process::exit(code),
            None => std::process::exit(1),
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_args_is_current_dir() {
        assert_eq!(parse_target_args(&[]), Ok((RunMode::Direct, None)));
    }

    #[test]
    fn test_path_only() {
        assert_eq!(
            parse_target_args(&args(&["./pkg"])),
            Ok((RunMode::Direct, Some(PathBuf::from("./pkg"))))
        );
    }

    #[test]
    fn test_debug_token() {
        assert_eq!(parse_target_args(&args(&["debug"])), Ok((RunMode::Debug, None)));
        assert_eq!(
            parse_target_args(&args(&["debug", "pkg/store_test.go"])),
            Ok((RunMode::Debug, Some(PathBuf::from("pkg/store_test.go"))))
        );
    }

    #[test]
    fn test_second_path_is_rejected() {
        let err = parse_target_args(&args(&["pkg", "extra"])).unwrap_err();
        assert!(err.contains("extra"));
        assert!(parse_target_args(&args(&["pkg", "debug"])).is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::parse_from(["gosel", "debug", "pkg", "--dry-run", "-vv"]);
        assert_eq!(cli.args, vec!["debug", "pkg"]);
        assert!(cli.dry_run);
        assert_eq!(cli.verbose, 2);
    }
}
