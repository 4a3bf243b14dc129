//! Error types shared across the scaffolding pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while discovering, resolving, fetching, or copying
/// templates.
///
/// Orchestration layers (prompts, binaries) wrap these in `anyhow` at the
/// edge; everything below the edge stays typed so callers can match on the
/// failure they care about.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The configured template root does not exist or is not a directory.
    #[error("template directory not found: {path}")]
    TemplateRootMissing { path: PathBuf },

    /// The requested template key was not present in the registry.
    #[error("unknown template: {name}")]
    UnknownTemplate { name: String },

    /// The template ships multiple language variants and none was chosen.
    #[error("template '{name}' needs a language (javascript or typescript)")]
    LanguageRequired { name: String },

    /// A language was chosen that the template does not provide.
    #[error("template '{name}' has no {language} variant")]
    VariantUnavailable { name: String, language: String },

    /// The remote template link is not something git clone can consume.
    #[error("invalid template link: {link}")]
    InvalidLink { link: String },

    /// Cloning a remote template failed.
    #[error("failed to fetch template from {link}: {detail}")]
    FetchFailed { link: String, detail: String },

    /// Token substitution produced a path that would escape the destination.
    #[error("rendered path escapes the destination: {path}")]
    UnsafeRenderedPath { path: PathBuf },

    /// An external command could not even be launched.
    #[error("could not launch {command}")]
    CommandLaunch {
        command: String,
        #[source]
        source: io::Error,
    },

    /// Filesystem failure with a short description of what was attempted.
    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl ScaffoldError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

pub type ScaffoldResult<T> = Result<T, ScaffoldError>;
