//! The post-copy steps: repository init and dependency install.
//!
//! Steps never abort the process. Each returns a [`TaskStatus`] and the
//! sequencer decides whether later steps still run; the collected
//! [`TaskReport`] is printed at the end either way.

use std::path::Path;

use colored::Colorize;

use super::process::{display_command, run_command};

/// Skip message shown when yarn is not usable.
pub const YARN_SKIP_MESSAGE: &str =
    "yarn not available, install it via `npm install -g yarn`";

/// Step titles, shared by the interactive flow and the report.
pub const INSTALL_PRIMARY_TITLE: &str = "install package dependencies with yarn";
pub const INSTALL_FALLBACK_TITLE: &str = "install package dependencies with npm";

pub fn git_title(dir: &Path) -> String {
    format!("initialize git in {}", dir.display())
}

/// Outcome of one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Completed,
    /// Deliberately not run; carries the reason shown to the user.
    Skipped(String),
    /// The step ran and went wrong; later steps do not run.
    Failed(String),
}

impl TaskStatus {
    pub fn is_failure(&self) -> bool {
        matches!(self, TaskStatus::Failed(_))
    }
}

/// Everything that happened this run, in step order.
#[derive(Debug, Default)]
pub struct TaskReport {
    entries: Vec<(String, TaskStatus)>,
}

impl TaskReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, title: impl Into<String>, status: TaskStatus) {
        self.entries.push((title.into(), status));
    }

    pub fn has_failure(&self) -> bool {
        self.entries.iter().any(|(_, status)| status.is_failure())
    }

    pub fn entries(&self) -> &[(String, TaskStatus)] {
        &self.entries
    }
}

/// Whether the dependency install must fall back to npm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallContext {
    pub use_fallback: bool,
}

/// Map the primary installer's success to a status and the follow-up
/// decision. Any yarn failure, launch failure included, downgrades to a
/// skip so npm gets its turn.
pub fn primary_outcome(success: bool) -> (TaskStatus, InstallContext) {
    if success {
        (TaskStatus::Completed, InstallContext::default())
    } else {
        (
            TaskStatus::Skipped(YARN_SKIP_MESSAGE.to_string()),
            InstallContext { use_fallback: true },
        )
    }
}

/// Initialize a git repository in `dir` and stage everything.
pub async fn init_repository(dir: &Path) -> TaskStatus {
    let commands: [&[&str]; 3] = [&["init"], &["add", "--all"], &["status"]];
    for args in commands {
        match run_command("git", args, dir).await {
            Ok(out) if out.success() => echo_output(&out.stdout),
            Ok(out) => return TaskStatus::Failed(failure_detail("git", args, &out.stderr)),
            Err(e) => return TaskStatus::Failed(e.to_string()),
        }
    }
    TaskStatus::Completed
}

/// Install dependencies with yarn, reporting whether npm should run instead.
pub async fn install_primary(dir: &Path) -> (TaskStatus, InstallContext) {
    match run_command("yarn", &["install"], dir).await {
        Ok(out) if out.success() => {
            echo_output(&out.stdout);
            primary_outcome(true)
        }
        _ => primary_outcome(false),
    }
}

/// The npm fallback. Unlike yarn, a failure here is a real failure.
pub async fn install_fallback(dir: &Path) -> TaskStatus {
    match run_command("npm", &["install"], dir).await {
        Ok(out) if out.success() => {
            echo_output(&out.stdout);
            TaskStatus::Completed
        }
        Ok(out) => TaskStatus::Failed(failure_detail("npm", &["install"], &out.stderr)),
        Err(e) => TaskStatus::Failed(e.to_string()),
    }
}

fn echo_output(stdout: &str) {
    for line in stdout.lines() {
        println!("  {}", line.dimmed());
    }
}

fn failure_detail(program: &str, args: &[&str], stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        format!("{} failed", display_command(program, args))
    } else {
        format!("{}: {}", display_command(program, args), stderr)
    }
}
