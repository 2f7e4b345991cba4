//! Display-name normalization for icon classes.
//!
//! Turns `fa-solid fa-star` into `star` by stripping one style token and then
//! one prefix marker. Tokens from every registered library are considered,
//! not just the detected one, and longer tokens are tried first so that
//! `fa-solid` never leaves `solid` behind as residue.

use regex::Regex;

use super::registry::{IconLibrary, LibraryRegistry};
use crate::error::{PickerError, PickerResult};

/// Compiled stripping rules for a set of libraries.
#[derive(Debug, Clone)]
pub struct DisplayNormalizer {
    /// `^(?:fa-regular|fa-brands|...)\s+`
    style_tokens: Option<Regex>,
    /// `^(?:mdi|fa|ph|bi)-`
    prefix_markers: Option<Regex>,
}

impl DisplayNormalizer {
    pub fn new(libraries: &[IconLibrary]) -> PickerResult<Self> {
        let tokens = longest_first(libraries.iter().flat_map(|lib| {
            lib.styles
                .iter()
                .map(|s| s.token.as_str())
                .chain(lib.legacy_style_tokens.iter().map(String::as_str))
        }));
        let prefixes = longest_first(libraries.iter().map(|lib| lib.icon_prefix.as_str()));

        Ok(Self {
            style_tokens: alternation(&tokens, r"\s+")?,
            prefix_markers: alternation(&prefixes, "-")?,
        })
    }

    /// Bare icon name for a fully-qualified class.
    pub fn clean(&self, icon_class: &str) -> String {
        let mut name = icon_class.trim();

        if let Some(m) = self.style_tokens.as_ref().and_then(|re| re.find(name)) {
            name = &name[m.end()..];
        }
        if let Some(m) = self.prefix_markers.as_ref().and_then(|re| re.find(name)) {
            name = &name[m.end()..];
        }

        name.to_string()
    }
}

/// Deduplicated tokens, longest first, ties alphabetical.
fn longest_first<'a>(tokens: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut tokens: Vec<&str> = tokens.filter(|t| !t.is_empty()).collect();
    tokens.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    tokens.dedup();
    tokens
}

fn alternation(tokens: &[&str], suffix: &str) -> PickerResult<Option<Regex>> {
    if tokens.is_empty() {
        return Ok(None);
    }

    let escaped: Vec<String> = tokens.iter().map(|t| regex::escape(t)).collect();
    let pattern = format!("^(?:{}){}", escaped.join("|"), suffix);
    Regex::new(&pattern)
        .map(Some)
        .map_err(|e| PickerError::InvalidRegistry(format!("display pattern: {}", e)))
}

/// Clean a class name using the built-in registry.
pub fn clean_icon_name_for_display(icon_class: &str) -> String {
    LibraryRegistry::builtin().clean_display_name(icon_class)
}
