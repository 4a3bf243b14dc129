//! Template discovery from the layout of the template root.
//!
//! There is no manifest. A directory named `api` is a template called `api`;
//! directories named `api-javascript` and `api-typescript` are two language
//! variants of the same `api` template. The registry groups a raw directory
//! listing into that shape.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{ScaffoldError, ScaffoldResult};

/// Implementation languages a template can ship variants for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    JavaScript,
    TypeScript,
}

impl Language {
    /// The lowercase suffix used in template directory names.
    pub fn tag(&self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
        }
    }

    /// Parse a directory-name suffix, case-insensitively.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "javascript" => Some(Language::JavaScript),
            "typescript" => Some(Language::TypeScript),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One selectable template: its key plus whatever language variants exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    pub key: String,
    pub variants: Vec<Language>,
}

impl TemplateEntry {
    pub fn has_variant(&self, language: Language) -> bool {
        self.variants.contains(&language)
    }
}

/// All templates found under a template root, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    entries: Vec<TemplateEntry>,
}

impl TemplateRegistry {
    /// Group raw directory names into templates.
    ///
    /// `api-typescript` contributes a `typescript` variant to the `api`
    /// entry; `widget` becomes a variant-less entry. The first appearance of
    /// a key fixes its position; duplicate variants are ignored. A name that
    /// is nothing but a language tag yields the empty-string key, which is
    /// kept: the layout is the configuration, odd layouts included.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries: Vec<TemplateEntry> = Vec::new();

        for name in names {
            let name = name.as_ref();
            // A name without a hyphen is one segment, and that segment is
            // "last": a directory named exactly `javascript` gets the empty
            // key, same as `-javascript`.
            let (prefix, last) = name.rsplit_once('-').unwrap_or(("", name));
            let (key, language) = match Language::from_tag(last) {
                Some(language) => (prefix.to_string(), Some(language)),
                None => (name.to_string(), None),
            };

            match entries.iter_mut().find(|entry| entry.key == key) {
                Some(entry) => {
                    if let Some(language) = language {
                        if !entry.has_variant(language) {
                            entry.variants.push(language);
                        }
                    }
                }
                None => entries.push(TemplateEntry {
                    key,
                    variants: language.into_iter().collect(),
                }),
            }
        }

        Self { entries }
    }

    /// Discover templates by listing the immediate children of `root`.
    ///
    /// Non-directories are skipped. A missing or non-directory root is a
    /// configuration error, reported before anything interactive happens.
    pub fn scan(root: &Path) -> ScaffoldResult<Self> {
        if !root.is_dir() {
            return Err(ScaffoldError::TemplateRootMissing {
                path: root.to_path_buf(),
            });
        }

        let mut names = Vec::new();
        let listing = fs::read_dir(root)
            .map_err(|e| ScaffoldError::io(format!("could not list {}", root.display()), e))?;
        for entry in listing {
            let entry = entry
                .map_err(|e| ScaffoldError::io(format!("could not list {}", root.display()), e))?;
            if entry.path().is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }

        Ok(Self::from_names(names))
    }

    pub fn get(&self, key: &str) -> Option<&TemplateEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    pub fn entries(&self) -> &[TemplateEntry] {
        &self.entries
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
