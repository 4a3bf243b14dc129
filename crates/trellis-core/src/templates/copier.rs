//! Recursive template copy with token substitution.
//!
//! Directory and file names are always rendered; file contents are only
//! rendered when the source name carries the `.art` marker extension, which
//! is stripped from the destination name. Everything else is copied byte for
//! byte, so binary assets survive.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{ScaffoldError, ScaffoldResult};
use crate::render::{render, TokenMap};

/// Extension that opts a file into content rendering.
pub const TEMPLATE_MARKER_EXT: &str = "art";

/// One file that was written during a copy, for progress reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyRecord {
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// Copy the tree under `src` into `dst`, substituting tokens as it goes.
///
/// A missing `src` is a no-op, not an error: callers probe candidate
/// template locations and an empty record list tells them nothing was there.
/// Existing files under `dst` are overwritten without prompting; the command
/// layer refuses to scaffold into a destination that already exists, so this
/// only matters for deliberate re-runs into the same tree.
pub fn copy_tree(src: &Path, dst: &Path, tokens: &TokenMap) -> ScaffoldResult<Vec<CopyRecord>> {
    let src = strip_trailing_separator(src);
    let dst = strip_trailing_separator(dst);

    if !src.is_dir() {
        return Ok(Vec::new());
    }
    fs::create_dir_all(&dst)
        .map_err(|e| ScaffoldError::io(format!("could not create {}", dst.display()), e))?;

    let mut records = Vec::new();
    for entry in WalkDir::new(&src).min_depth(1).follow_links(true) {
        let entry = entry.map_err(|e| walk_error(&src, e))?;
        let rel = entry
            .path()
            .strip_prefix(&src)
            .map_err(|_| walk_escape(entry.path()))?;

        if entry.file_type().is_dir() {
            let target = dst.join(rendered_relative(rel, tokens)?);
            fs::create_dir_all(&target).map_err(|e| {
                ScaffoldError::io(format!("could not create {}", target.display()), e)
            })?;
            continue;
        }

        let marked = rel.extension().is_some_and(|ext| ext == TEMPLATE_MARKER_EXT);
        let rel = if marked {
            rel.with_extension("")
        } else {
            rel.to_path_buf()
        };
        let target = dst.join(rendered_relative(&rel, tokens)?);

        if marked {
            // Marked files must be UTF-8; their contents pass through the
            // same substitution as names.
            let content = fs::read_to_string(entry.path()).map_err(|e| {
                ScaffoldError::io(format!("could not read {}", entry.path().display()), e)
            })?;
            fs::write(&target, render(&content, tokens)).map_err(|e| {
                ScaffoldError::io(format!("could not write {}", target.display()), e)
            })?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| {
                ScaffoldError::io(format!("could not copy to {}", target.display()), e)
            })?;
        }

        records.push(CopyRecord {
            source: entry.path().to_path_buf(),
            destination: target,
        });
    }

    Ok(records)
}

/// Render a source-relative path and reject anything that would land
/// outside the destination.
fn rendered_relative(rel: &Path, tokens: &TokenMap) -> ScaffoldResult<PathBuf> {
    let rendered = PathBuf::from(render(&rel.to_string_lossy(), tokens));
    let escapes = rendered.is_absolute()
        || rendered
            .components()
            .any(|c| matches!(c, Component::ParentDir));
    if escapes {
        return Err(ScaffoldError::UnsafeRenderedPath { path: rendered });
    }
    Ok(rendered)
}

/// Drop one trailing separator so `templates/api/` and `templates/api`
/// name the same tree.
fn strip_trailing_separator(path: &Path) -> PathBuf {
    let text = path.to_string_lossy();
    match text.strip_suffix(std::path::is_separator) {
        Some(stripped) if !stripped.is_empty() => PathBuf::from(stripped),
        _ => path.to_path_buf(),
    }
}

fn walk_error(src: &Path, err: walkdir::Error) -> ScaffoldError {
    let context = format!("could not walk {}", src.display());
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::other("symlink loop"));
    ScaffoldError::io(context, source)
}

fn walk_escape(path: &Path) -> ScaffoldError {
    ScaffoldError::io(
        format!("walked outside {}", path.display()),
        io::Error::other("entry outside template root"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_tokens() -> TokenMap {
        TokenMap::for_name("PROJECT_NAME", "demo")
    }

    #[test]
    fn test_missing_source_is_a_noop() {
        let dst = tempfile::tempdir().unwrap();
        let records = copy_tree(
            Path::new("/no/such/template"),
            dst.path(),
            &demo_tokens(),
        )
        .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_plain_file_copied_without_content_rendering() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        fs::write(src.path().join("notes.md"), "keep {{PROJECT_NAME}}").unwrap();

        copy_tree(src.path(), &dst.path().join("out"), &demo_tokens()).unwrap();

        let copied = fs::read_to_string(dst.path().join("out/notes.md")).unwrap();
        assert_eq!(copied, "keep {{PROJECT_NAME}}");
    }

    #[test]
    fn test_marked_file_rendered_and_marker_stripped() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        fs::write(
            src.path().join("package.json.art"),
            "{\"name\": \"{{PROJECT_NAME}}\"}",
        )
        .unwrap();

        copy_tree(src.path(), &dst.path().join("out"), &demo_tokens()).unwrap();

        let out = dst.path().join("out");
        assert!(!out.join("package.json.art").exists());
        let rendered = fs::read_to_string(out.join("package.json")).unwrap();
        assert_eq!(rendered, "{\"name\": \"demo\"}");
    }

    #[test]
    fn test_marker_as_only_extension() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        fs::write(src.path().join("index.art"), "Hello {{PROJECT_NAME}}").unwrap();

        copy_tree(src.path(), &dst.path().join("out"), &demo_tokens()).unwrap();

        let rendered = fs::read_to_string(dst.path().join("out/index")).unwrap();
        assert_eq!(rendered, "Hello demo");
    }

    #[test]
    fn test_file_names_rendered_even_without_marker() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        fs::write(src.path().join("{{PROJECT_NAME}}.txt"), "body").unwrap();

        copy_tree(src.path(), &dst.path().join("out"), &demo_tokens()).unwrap();

        assert!(dst.path().join("out/demo.txt").exists());
    }

    #[test]
    fn test_nested_directories_preserved() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        fs::create_dir_all(src.path().join("src/components")).unwrap();
        fs::write(src.path().join("src/components/App.jsx"), "app").unwrap();

        let records =
            copy_tree(src.path(), &dst.path().join("out"), &demo_tokens()).unwrap();

        assert!(dst.path().join("out/src/components/App.jsx").exists());
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_directory_names_rendered() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        fs::create_dir_all(src.path().join("{{PROJECT_NAME}}-site")).unwrap();
        fs::write(src.path().join("{{PROJECT_NAME}}-site/index.html"), "<p>").unwrap();

        copy_tree(src.path(), &dst.path().join("out"), &demo_tokens()).unwrap();

        assert!(dst.path().join("out/demo-site/index.html").exists());
    }

    #[test]
    fn test_trailing_separator_ignored() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        fs::write(src.path().join("a.txt"), "a").unwrap();

        let with_sep = format!("{}/", src.path().display());
        copy_tree(
            Path::new(&with_sep),
            &dst.path().join("out"),
            &demo_tokens(),
        )
        .unwrap();

        assert!(dst.path().join("out/a.txt").exists());
    }

    #[test]
    fn test_rendered_path_escape_rejected() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        fs::write(src.path().join("{{PROJECT_NAME}}.txt"), "x").unwrap();

        let tokens = TokenMap::new().with("PROJECT_NAME", "../evil");
        let err = copy_tree(src.path(), &dst.path().join("out"), &tokens).unwrap_err();
        assert!(matches!(err, ScaffoldError::UnsafeRenderedPath { .. }));
    }

    #[test]
    fn test_records_cover_files_not_directories() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        fs::create_dir_all(src.path().join("src")).unwrap();
        fs::write(src.path().join("src/main.js"), "x").unwrap();
        fs::write(src.path().join("README.md"), "y").unwrap();

        let records =
            copy_tree(src.path(), &dst.path().join("out"), &demo_tokens()).unwrap();

        assert_eq!(records.len(), 2);
        for record in &records {
            assert!(record.destination.is_file());
        }
    }

    #[test]
    fn test_rerun_overwrites_existing_files() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        let out = dst.path().join("out");
        fs::write(src.path().join("config.art"), "{{PROJECT_NAME}}").unwrap();

        copy_tree(src.path(), &out, &demo_tokens()).unwrap();
        fs::write(out.join("config"), "edited by hand").unwrap();
        copy_tree(src.path(), &out, &demo_tokens()).unwrap();

        assert_eq!(fs::read_to_string(out.join("config")).unwrap(), "demo");
    }
}
