//! Shared external stylesheet links.
//!
//! A page holds at most one `<link rel="stylesheet">` per id. The first
//! request creates it; later requests update its address in place. Links
//! live for the whole page and are never removed.

use std::collections::BTreeMap;

/// Id of the link that carries the configured icon font.
pub const ICON_FONT_LINK_ID: &str = "icon-font-css";

/// One `<link rel="stylesheet">` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylesheetLink {
    pub id: String,
    pub href: String,
}

impl StylesheetLink {
    pub fn to_html(&self) -> String {
        format!(
            r#"<link id="{}" rel="stylesheet" href="{}">"#,
            escape_attr(&self.id),
            escape_attr(&self.href)
        )
    }
}

/// Set of active stylesheet links keyed by id.
#[derive(Debug, Default)]
pub struct StylesheetSet {
    links: BTreeMap<String, StylesheetLink>,
}

impl StylesheetSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the link `id`, pointing it at `href`.
    ///
    /// Returns true if the link's address changed (including creation).
    pub fn ensure(&mut self, id: &str, href: &str) -> bool {
        match self.links.get_mut(id) {
            Some(link) if link.href == href => false,
            Some(link) => {
                tracing::debug!(id, from = %link.href, to = href, "Updating stylesheet link");
                link.href = href.to_string();
                true
            }
            None => {
                tracing::debug!(id, href, "Creating stylesheet link");
                self.links.insert(
                    id.to_string(),
                    StylesheetLink {
                        id: id.to_string(),
                        href: href.to_string(),
                    },
                );
                true
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&StylesheetLink> {
        self.links.get(id)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// All links as HTML, one per line.
    pub fn to_html(&self) -> String {
        self.links
            .values()
            .map(StylesheetLink::to_html)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Escape a value for use inside a double-quoted HTML attribute.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
