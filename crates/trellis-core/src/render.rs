//! Token substitution for template names and contents.
//!
//! Placeholders look like `{{PROJECT_NAME}}`. Rendering is a single
//! left-to-right pass: replacement text is emitted verbatim and never
//! rescanned, so a value containing `{{` cannot trigger another expansion.

use std::collections::HashMap;

/// Bindings from token name to replacement text.
#[derive(Debug, Clone, Default)]
pub struct TokenMap {
    inner: HashMap<String, String>,
}

impl TokenMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a binding, replacing any previous value for the token.
    pub fn with(mut self, token: impl Into<String>, value: impl Into<String>) -> Self {
        self.inner.insert(token.into(), value.into());
        self
    }

    /// Standard bindings for a named thing: the token itself plus a derived
    /// `<TOKEN>_UPPER` form for templates that need shouting case.
    pub fn for_name(token: &str, value: &str) -> Self {
        Self::new()
            .with(token, value)
            .with(format!("{token}_UPPER"), value.to_uppercase())
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.inner.get(token).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Replace every `{{TOKEN}}` in `text` with its bound value.
///
/// Unknown tokens are left untouched so unrelated brace syntax in template
/// files survives the copy. Malformed placeholders (an opener with no `}}`)
/// are passed through as-is.
pub fn render(text: &str, tokens: &TokenMap) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        match after_open.find("}}") {
            Some(end) => {
                let raw = &after_open[..end];
                match tokens.get(raw.trim()) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push_str("{{");
                        out.push_str(raw);
                        out.push_str("}}");
                    }
                }
                rest = &after_open[end + 2..];
            }
            None => {
                // Unterminated placeholder: emit the rest verbatim.
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}
