//! Template discovery, resolution, and copying.

mod copier;
mod registry;
mod resolver;

pub use copier::{copy_tree, CopyRecord, TEMPLATE_MARKER_EXT};
pub use registry::{Language, TemplateEntry, TemplateRegistry};
pub use resolver::{
    bundled_root, fetch_remote, resolve_builtin, scratch_dir, validate_link, RootKind, Selection,
};
