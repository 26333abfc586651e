//! External process execution
//!
//! Build commands run through the platform shell with the parent's standard
//! streams inherited, so the build tool's own output reaches the terminal live.
//! Only the exit status comes back.

use std::process::{Command, Stdio};

use crate::core::builder::CommandRunner;
use crate::error::CommandFailure;

/// Runs commands with `sh -c` (`cmd /C` on Windows)
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }

    fn shell_command(command: &str) -> Command {
        #[cfg(windows)]
        let cmd = {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", command]);
            cmd
        };

        #[cfg(not(windows))]
        let cmd = {
            let mut cmd = Command::new("sh");
            cmd.args(["-c", command]);
            cmd
        };

        cmd
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str) -> Result<(), CommandFailure> {
        let status = Self::shell_command(command)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| CommandFailure::Launch {
                command: command.to_string(),
                source,
            })?;

        if status.success() {
            return Ok(());
        }

        Err(match status.code() {
            Some(code) => CommandFailure::Exit {
                command: command.to_string(),
                code,
            },
            None => CommandFailure::Signal {
                command: command.to_string(),
            },
        })
    }
}
