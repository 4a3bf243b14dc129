//! Product configuration trait for CLI binaries
//!
//! The scaffolding engine is product-agnostic: everything branded (names,
//! banner, env vars, token names, follow-up instructions) comes from this
//! trait, so multiple branded binaries can share one engine.

/// Configuration trait for different CLI products
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// ASCII art banner printed before anything else
    fn banner(&self) -> &'static str;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;

    /// Environment variable overriding the project template root
    fn template_dir_env(&self) -> &'static str;

    /// Environment variable overriding the widget template root
    fn widget_dir_env(&self) -> &'static str;

    /// Token substituted with the project directory name
    fn project_token(&self) -> &'static str {
        "PROJECT_NAME"
    }

    /// Token substituted with the widget name
    fn component_token(&self) -> &'static str {
        "COMPONENT_NAME"
    }

    /// Directory name under the system temp dir used for remote clones
    fn scratch_dir_name(&self) -> &'static str;

    /// The "next steps" instructions after project creation
    fn next_steps(&self, dir: &str) -> Vec<String>;
}
