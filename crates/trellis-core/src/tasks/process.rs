//! Thin wrapper over `tokio::process` with captured output.

use std::path::Path;
use std::process::ExitStatus;

use tokio::process::Command;

use crate::error::{ScaffoldError, ScaffoldResult};

/// Captured result of one external command.
#[derive(Debug)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Run `program` with `args` in `cwd`, waiting for it to finish.
///
/// A non-zero exit is not an error here; callers decide what a failed
/// command means for their step. Only failing to launch at all (binary not
/// on PATH, permission denied) maps to `CommandLaunch`.
pub async fn run_command(
    program: &str,
    args: &[&str],
    cwd: &Path,
) -> ScaffoldResult<CommandOutput> {
    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .output()
        .await
        .map_err(|e| ScaffoldError::CommandLaunch {
            command: display_command(program, args),
            source: e,
        })?;

    Ok(CommandOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// The command line as a human would type it, for error messages.
pub fn display_command(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}
