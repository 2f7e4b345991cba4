//! Client-side filtering over an extracted icon set.
//!
//! Nothing here re-fetches or re-detects; it only narrows a list that has
//! already been extracted.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use super::registry::{IconLibrary, LibraryRegistry};

/// Search term and optional style group applied to an icon list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IconFilter {
    pub search: String,
    pub style: Option<String>,
}

impl IconFilter {
    pub fn new(search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            style: None,
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Whether the filter lets everything through.
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty() && self.style.is_none()
    }

    /// Apply the filter, keeping the input order.
    pub fn apply<'a>(
        &self,
        icons: &'a [String],
        library: &IconLibrary,
        registry: &LibraryRegistry,
    ) -> Vec<&'a str> {
        let by_style = filter_by_style(icons, library, self.style.as_deref());
        filter_by_name(by_style, &self.search, registry)
    }
}

/// Case-insensitive substring match against each icon's display name.
pub fn filter_by_name<'a>(
    icons: impl IntoIterator<Item = &'a str>,
    term: &str,
    registry: &LibraryRegistry,
) -> Vec<&'a str> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return icons.into_iter().collect();
    }

    icons
        .into_iter()
        .filter(|icon| {
            registry
                .clean_display_name(icon)
                .to_lowercase()
                .contains(&term)
        })
        .collect()
}

/// Keep only icons rendered in the given style; `None` keeps everything.
pub fn filter_by_style<'a>(
    icons: &'a [String],
    library: &IconLibrary,
    style: Option<&str>,
) -> Vec<&'a str> {
    let token = match style {
        None => return icons.iter().map(String::as_str).collect(),
        Some(name) => match library.style(name) {
            Some(variant) => variant.token.as_str(),
            None => return Vec::new(),
        },
    };

    icons
        .iter()
        .map(String::as_str)
        .filter(|icon| icon.split_whitespace().next() == Some(token))
        .collect()
}

/// Number of icons per style, in the library's style order.
pub fn style_counts<'a>(icons: &[String], library: &'a IconLibrary) -> Vec<(&'a str, usize)> {
    library
        .styles
        .iter()
        .map(|style| {
            let count = icons
                .iter()
                .filter(|icon| library.style_of(icon) == Some(style))
                .count();
            (style.name.as_str(), count)
        })
        .collect()
}

/// Rank icons by fuzzy score against their display names.
pub fn rank<'a>(
    icons: impl IntoIterator<Item = &'a str>,
    query: &str,
    registry: &LibraryRegistry,
    max_results: usize,
) -> Vec<&'a str> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return icons.into_iter().take(max_results).collect();
    }

    let matcher = SkimMatcherV2::default();
    let mut results: Vec<(i64, &str)> = Vec::new();

    for icon in icons {
        let name = registry.clean_display_name(icon).to_lowercase();
        if let Some(score) = matcher.fuzzy_match(&name, &query) {
            // Boost exact prefix matches
            let boosted = if name.starts_with(&query) {
                score + 100
            } else {
                score
            };
            results.push((boosted, icon));
        }
    }

    // Stable sort keeps alphabetical order among equal scores
    results.sort_by(|a, b| b.0.cmp(&a.0));
    results
        .into_iter()
        .take(max_results)
        .map(|(_, icon)| icon)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> &'static LibraryRegistry {
        LibraryRegistry::builtin()
    }

    fn icons(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_search_st() {
        let set = icons(&["fa-solid fa-heart", "fa-solid fa-star"]);
        let found = filter_by_name(set.iter().map(String::as_str), "st", registry());
        assert_eq!(found, ["fa-solid fa-star"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let set = icons(&["fa-solid fa-heart", "fa-solid fa-star"]);
        let found = filter_by_name(set.iter().map(String::as_str), "HEA", registry());
        assert_eq!(found, ["fa-solid fa-heart"]);
    }

    #[test]
    fn test_search_ignores_style_prefix() {
        // "solid" only appears in the style token, never in a display name
        let set = icons(&["fa-solid fa-heart", "fa-solid fa-star"]);
        let found = filter_by_name(set.iter().map(String::as_str), "solid", registry());
        assert!(found.is_empty());
    }

    #[test]
    fn test_empty_search_keeps_all() {
        let set = icons(&["ph ph-heart", "ph-bold ph-heart"]);
        let found = filter_by_name(set.iter().map(String::as_str), "  ", registry());
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_style_filter() {
        let fa = registry().get("Font Awesome").unwrap();
        let set = icons(&["fa-brands fa-star", "fa-regular fa-star", "fa-solid fa-star"]);

        assert_eq!(filter_by_style(&set, fa, Some("solid")), ["fa-solid fa-star"]);
        assert_eq!(filter_by_style(&set, fa, None).len(), 3);
        assert!(filter_by_style(&set, fa, Some("duotone")).is_empty());
    }

    #[test]
    fn test_combined_filter() {
        let fa = registry().get("Font Awesome").unwrap();
        let set = icons(&[
            "fa-regular fa-heart",
            "fa-regular fa-star",
            "fa-solid fa-heart",
            "fa-solid fa-star",
        ]);
        let filter = IconFilter::new("star").with_style("regular");
        assert!(!filter.is_empty());
        assert_eq!(filter.apply(&set, fa, registry()), ["fa-regular fa-star"]);
        assert!(IconFilter::default().is_empty());
    }

    #[test]
    fn test_style_counts() {
        let ph = registry().get("Phosphor").unwrap();
        let set = icons(&["ph ph-heart", "ph ph-bell", "ph-bold ph-heart"]);
        let counts = style_counts(&set, ph);
        assert!(counts.contains(&("regular", 2)));
        assert!(counts.contains(&("bold", 1)));
        assert!(counts.contains(&("thin", 0)));
    }

    #[test]
    fn test_rank_prefers_prefix_match() {
        let set = icons(&["fa-solid fa-arrow-right", "fa-solid fa-star", "fa-solid fa-user-astronaut"]);
        let ranked = rank(set.iter().map(String::as_str), "star", registry(), 10);
        assert_eq!(ranked.first(), Some(&"fa-solid fa-star"));
    }

    #[test]
    fn test_rank_respects_limit() {
        let set = icons(&["bi bi-alarm", "bi bi-alarm-fill", "bi bi-archive"]);
        assert_eq!(rank(set.iter().map(String::as_str), "", registry(), 2).len(), 2);
    }
}
