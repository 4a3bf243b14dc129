//! Trellis Core - Shared library for project scaffolding CLIs
//!
//! This library provides the core functionality for scaffolding projects from
//! templates: discovering templates from a directory layout, substituting
//! `{{TOKEN}}` placeholders in names and contents, and sequencing the
//! post-copy tasks (git init, dependency install). It is designed to be used
//! by branded CLI binaries that share the same engine but differ in product
//! configuration.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Pure functions for token rendering,
//!   template discovery/resolution, and the recursive copy
//! - **Layer 2: Task Sequencing** - External commands (git, yarn, npm) with
//!   collected per-step outcomes
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts
//!   (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use trellis_core::{render::TokenMap, templates};
//!
//! let registry = templates::TemplateRegistry::scan(root)?;
//! let source = templates::resolve_builtin(&registry, root, &selection)?;
//! let tokens = TokenMap::for_name("PROJECT_NAME", "demo");
//! let records = templates::copy_tree(&source, &destination, &tokens)?;
//! ```

pub mod error;
pub mod product;
pub mod render;
pub mod tasks;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::{ScaffoldError, ScaffoldResult};
pub use product::ProductConfig;
pub use render::{render, TokenMap};
pub use templates::{copy_tree, CopyRecord, Language, TemplateRegistry};

#[cfg(feature = "tui")]
pub use tui::{run_create, run_generate, ScaffoldOptions};
