//! CSS icon extraction.
//!
//! Scans raw stylesheet text with a library's extraction patterns and expands
//! every icon name found into one fully-qualified class per declared style.
//! An icon seen once under any style is offered in all of them.

use std::collections::BTreeSet;

use super::registry::IconLibrary;

/// Captures that come from `@font-face` blocks rather than icon rules.
const FONT_FACE: &str = "font-face";

/// Icon base names found in `css`, before style expansion.
pub fn extract_base_names(css: &str, library: &IconLibrary) -> BTreeSet<String> {
    let mut names = BTreeSet::new();

    for pattern in library.extraction_patterns() {
        for caps in pattern.captures_iter(css) {
            let Some(capture) = caps.get(1) else {
                continue;
            };
            let name = capture.as_str();
            if is_icon_name(name, library) {
                names.insert(name.to_string());
            }
        }
    }

    names
}

/// Every selectable class for `css`, sorted and de-duplicated.
pub fn extract_icons(css: &str, library: &IconLibrary) -> Vec<String> {
    let names = extract_base_names(css, library);
    let icons = expand_styles(names.iter().map(String::as_str), library);

    tracing::debug!(
        library = %library.name,
        names = names.len(),
        icons = icons.len(),
        "Extracted icon classes"
    );

    icons
}

/// Expand base names into classes for every style of `library`.
pub fn expand_styles<'a>(
    names: impl IntoIterator<Item = &'a str>,
    library: &IconLibrary,
) -> Vec<String> {
    let mut classes = BTreeSet::new();
    for name in names {
        for style in &library.styles {
            classes.insert(library.qualified_class(style, name));
        }
    }
    classes.into_iter().collect()
}

fn is_icon_name(name: &str, library: &IconLibrary) -> bool {
    name.chars().count() > 1 && name != FONT_FACE && !library.is_style_name(name)
}
