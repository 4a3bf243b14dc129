//! Post-copy task sequencing: git init and dependency installation.

mod process;
mod steps;

pub use process::{display_command, run_command, CommandOutput};
pub use steps::{
    git_title, init_repository, install_fallback, install_primary, primary_outcome,
    InstallContext, TaskReport, TaskStatus, INSTALL_FALLBACK_TITLE, INSTALL_PRIMARY_TITLE,
    YARN_SKIP_MESSAGE,
};
