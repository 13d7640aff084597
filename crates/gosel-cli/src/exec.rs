//! Process execution of the synthesized command.

use std::process::Command;

use gosel_core::CommandExecutor;

/// Shell used to interpret the command line.
const SHELL: &str = "sh";

/// Runs commands through `sh -c`, inheriting the terminal.
pub struct ShellExecutor {
    shell: String,
}

impl ShellExecutor {
    pub fn new() -> Self {
        Self {
            shell: SHELL.to_string(),
        }
    }
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExecutor for ShellExecutor {
    fn execute(&mut self, command: &str) -> std::io::Result<Option<i32>> {
        eprintln!("{}", command);
        let status = Command::new(&self.shell).arg("-c").arg(command).status()?;
        Ok(status.code())
    }
}
