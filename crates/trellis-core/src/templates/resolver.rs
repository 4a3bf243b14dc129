//! Turning a selection into a concrete template directory.
//!
//! Three sources feed the copier: a bundled template resolved against the
//! registry, a remote git repository cloned into a scratch directory, and
//! the widget root for `generate`. Root discovery prefers an explicit flag,
//! then the product's environment override, then the directory shipped next
//! to the installed binary.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use url::Url;

use super::registry::{Language, TemplateRegistry};
use crate::error::{ScaffoldError, ScaffoldResult};
use crate::product::ProductConfig;
use crate::tasks::run_command;

/// What the user picked: a template key, optionally narrowed to a language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub key: String,
    pub language: Option<Language>,
}

impl Selection {
    pub fn new(key: impl Into<String>, language: Option<Language>) -> Self {
        Self {
            key: key.into(),
            language,
        }
    }
}

/// Which bundled root a command reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootKind {
    Templates,
    Widgets,
}

impl RootKind {
    fn dir_name(&self) -> &'static str {
        match self {
            RootKind::Templates => "templates",
            RootKind::Widgets => "widgets",
        }
    }

    fn env_var<C: ProductConfig>(&self, config: &C) -> &'static str {
        match self {
            RootKind::Templates => config.template_dir_env(),
            RootKind::Widgets => config.widget_dir_env(),
        }
    }
}

/// Resolve a selection against the registry to a directory under `root`.
///
/// Variant-less templates live at `root/<key>`; variants at
/// `root/<key>-<language>`. A single variant is picked automatically, a
/// choice between several needs a language on the selection.
pub fn resolve_builtin(
    registry: &TemplateRegistry,
    root: &Path,
    selection: &Selection,
) -> ScaffoldResult<PathBuf> {
    let entry = registry
        .get(&selection.key)
        .ok_or_else(|| ScaffoldError::UnknownTemplate {
            name: selection.key.clone(),
        })?;

    let variant = match (entry.variants.as_slice(), selection.language) {
        ([], None) => None,
        ([], Some(language)) => {
            return Err(ScaffoldError::VariantUnavailable {
                name: entry.key.clone(),
                language: language.to_string(),
            })
        }
        ([only], None) => Some(*only),
        (_, None) => {
            return Err(ScaffoldError::LanguageRequired {
                name: entry.key.clone(),
            })
        }
        (_, Some(language)) if entry.has_variant(language) => Some(language),
        (_, Some(language)) => {
            return Err(ScaffoldError::VariantUnavailable {
                name: entry.key.clone(),
                language: language.to_string(),
            })
        }
    };

    let dir_name = match variant {
        Some(language) => format!("{}-{}", entry.key, language.tag()),
        None => entry.key.clone(),
    };
    Ok(root.join(dir_name))
}

/// Check that a template link is something `git clone` can consume.
///
/// Anything `url::Url` accepts passes (https, git, ssh schemes, file URLs),
/// plus scp-style `user@host:path` remotes, which are not URLs but are the
/// most common way people write git links.
pub fn validate_link(link: &str) -> ScaffoldResult<()> {
    if Url::parse(link).is_ok() {
        return Ok(());
    }
    let scp_like = link
        .split_once('@')
        .is_some_and(|(user, rest)| !user.is_empty() && rest.contains(':'));
    if scp_like {
        Ok(())
    } else {
        Err(ScaffoldError::InvalidLink {
            link: link.to_string(),
        })
    }
}

/// Clone a remote template into `scratch` and strip its git metadata.
///
/// A leftover scratch directory from an earlier run is deleted first, so
/// every fetch starts clean. Clone failures are fatal for the invocation;
/// there is no retry.
pub async fn fetch_remote(link: &str, scratch: &Path) -> ScaffoldResult<PathBuf> {
    validate_link(link)?;

    if scratch.exists() {
        fs::remove_dir_all(scratch).map_err(|e| {
            ScaffoldError::io(format!("could not clear {}", scratch.display()), e)
        })?;
    }

    let target = scratch.to_string_lossy();
    let out = run_command("git", &["clone", link, &target], &env::temp_dir()).await?;
    if !out.success() {
        let stderr = out.stderr.trim();
        return Err(ScaffoldError::FetchFailed {
            link: link.to_string(),
            detail: if stderr.is_empty() {
                format!("git clone exited with {}", out.status)
            } else {
                stderr.to_string()
            },
        });
    }

    // The clone's history has no business in a fresh project.
    let git_dir = scratch.join(".git");
    if git_dir.exists() {
        fs::remove_dir_all(&git_dir).map_err(|e| {
            ScaffoldError::io(format!("could not remove {}", git_dir.display()), e)
        })?;
    }

    Ok(scratch.to_path_buf())
}

/// The scratch directory remote templates are cloned into.
pub fn scratch_dir(name: &str) -> PathBuf {
    env::temp_dir().join(name)
}

/// Locate the template or widget root for a product.
pub fn bundled_root<C: ProductConfig>(
    config: &C,
    override_dir: Option<&Path>,
    kind: RootKind,
) -> ScaffoldResult<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }
    if let Ok(value) = env::var(kind.env_var(config)) {
        if !value.is_empty() {
            return Ok(PathBuf::from(value));
        }
    }

    let exe = env::current_exe()
        .map_err(|e| ScaffoldError::io("could not locate the running executable", e))?;
    let exe_dir = exe.parent().ok_or_else(|| {
        ScaffoldError::io(
            "could not locate the running executable",
            std::io::Error::other("executable has no parent directory"),
        )
    })?;
    Ok(exe_dir.join(kind.dir_name()))
}
