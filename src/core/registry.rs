//! Icon library registry.
//!
//! A closed, ordered table of icon-font libraries. Each entry knows how to
//! recognize itself from a stylesheet URL or body, and how to pull icon names
//! out of raw CSS. Order is priority: when two entries could match the same
//! input, the earlier one wins. New libraries are appended.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::display::DisplayNormalizer;
use crate::error::{PickerError, PickerResult};

/// Process-wide built-in registry, compiled once on first access.
static BUILTIN: Lazy<LibraryRegistry> = Lazy::new(|| {
    LibraryRegistry::from_definitions(BUILTIN_LIBRARIES)
        .expect("built-in icon library table is valid")
});

/// Declarative source for one library, compiled into an [`IconLibrary`].
#[derive(Debug, Clone, Copy)]
pub struct LibraryDefinition {
    pub name: &'static str,
    pub icon_prefix: &'static str,
    /// Tested against the stylesheet URL.
    pub url_patterns: &'static [&'static str],
    /// Tested against the CSS body. Keep these anchored to selectors or
    /// `font-family` declarations; a bare name can appear inside another
    /// library's icon names (`.mdi-font-awesome`).
    pub body_patterns: &'static [&'static str],
    pub extraction_patterns: &'static [&'static str],
    /// `(style name, class token)` pairs in display order.
    pub styles: &'static [(&'static str, &'static str)],
    pub legacy_style_tokens: &'static [&'static str],
    /// Style classes the extraction selectors accept that are not offered
    /// as variants, e.g. Font Awesome Pro's `light`.
    pub selector_styles: &'static [&'static str],
    pub metadata_available: bool,
}

/// Built-in libraries in priority order.
pub static BUILTIN_LIBRARIES: &[LibraryDefinition] = &[
    LibraryDefinition {
        name: "Font Awesome",
        icon_prefix: "fa",
        url_patterns: &[r"(?i)font-?awesome"],
        body_patterns: &[
            r#"(?i)font-family:\s*["']?Font ?Awesome"#,
            r"\.fa-(?:solid|regular|brands)\b",
            r"\.fa-[a-z0-9-]+::?before",
        ],
        extraction_patterns: &[
            r"\.fa-(?:solid|regular|brands|light|thin|duotone|sharp)\.fa-([A-Za-z0-9_-]+)::?before",
            r"\.fa-([A-Za-z0-9_-]+)::?before",
        ],
        styles: &[
            ("solid", "fa-solid"),
            ("regular", "fa-regular"),
            ("brands", "fa-brands"),
        ],
        legacy_style_tokens: &["fas", "far", "fab", "fal", "fat", "fad"],
        selector_styles: &["light", "thin", "duotone", "sharp"],
        metadata_available: true,
    },
    LibraryDefinition {
        name: "Phosphor",
        icon_prefix: "ph",
        url_patterns: &[r"(?i)phosphor"],
        body_patterns: &[
            r#"(?i)font-family:\s*["']?Phosphor"#,
            r"\.ph(?:-(?:thin|light|bold|fill|duotone))?\.ph-[a-z0-9-]+::?before",
        ],
        extraction_patterns: &[
            r"\.ph(?:-(?:thin|light|bold|fill|duotone))?\.ph-([A-Za-z0-9_-]+)::?before",
            r"\.ph-([A-Za-z0-9_-]+)::?before",
        ],
        styles: &[
            ("thin", "ph-thin"),
            ("light", "ph-light"),
            ("regular", "ph"),
            ("bold", "ph-bold"),
            ("fill", "ph-fill"),
            ("duotone", "ph-duotone"),
        ],
        legacy_style_tokens: &[],
        selector_styles: &[],
        metadata_available: false,
    },
    LibraryDefinition {
        name: "Bootstrap Icons",
        icon_prefix: "bi",
        url_patterns: &[r"(?i)bootstrap-icons"],
        body_patterns: &[
            r#"(?i)font-family:\s*["']?bootstrap-icons"#,
            r"\.bi-[a-z0-9-]+::?before",
        ],
        extraction_patterns: &[r"\.bi-([A-Za-z0-9_-]+)::?before"],
        styles: &[("regular", "bi")],
        legacy_style_tokens: &[],
        selector_styles: &[],
        metadata_available: false,
    },
    LibraryDefinition {
        name: "Material Design Icons",
        icon_prefix: "mdi",
        url_patterns: &[r"(?i)materialdesignicons|@mdi/font"],
        body_patterns: &[
            r#"(?i)font-family:\s*["']?Material Design Icons"#,
            r"\.mdi-[a-z0-9-]+::?before",
        ],
        extraction_patterns: &[r"\.mdi-([A-Za-z0-9_-]+)::?before"],
        styles: &[("regular", "mdi")],
        legacy_style_tokens: &[],
        selector_styles: &[],
        metadata_available: false,
    },
];

/// What to do when no library matches a stylesheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DetectionFallback {
    /// Use the first (highest priority) library's patterns
    #[default]
    FirstLibrary,
    /// Report the stylesheet as unsupported
    Strict,
}

/// One style variant of a library, e.g. `solid -> fa-solid`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleVariant {
    pub name: String,
    pub token: String,
}

/// A compiled icon library descriptor.
#[derive(Debug, Clone)]
pub struct IconLibrary {
    pub name: String,
    pub icon_prefix: String,
    pub styles: Vec<StyleVariant>,
    pub legacy_style_tokens: Vec<String>,
    pub metadata_available: bool,
    selector_styles: Vec<String>,
    url_patterns: Vec<Regex>,
    body_patterns: Vec<Regex>,
    extraction_patterns: Vec<Regex>,
}

impl IconLibrary {
    /// Compile a declarative definition, checking every pattern.
    pub fn compile(def: &LibraryDefinition) -> PickerResult<Self> {
        let compile_all = |patterns: &[&str]| -> PickerResult<Vec<Regex>> {
            patterns
                .iter()
                .map(|p| {
                    Regex::new(p).map_err(|e| {
                        PickerError::InvalidRegistry(format!("{}: bad pattern '{}': {}", def.name, p, e))
                    })
                })
                .collect()
        };

        let url_patterns = compile_all(def.url_patterns)?;
        let body_patterns = compile_all(def.body_patterns)?;
        let extraction_patterns = compile_all(def.extraction_patterns)?;

        if let Some(re) = extraction_patterns.iter().find(|re| re.captures_len() < 2) {
            return Err(PickerError::InvalidRegistry(format!(
                "{}: extraction pattern '{}' has no capture group",
                def.name,
                re.as_str()
            )));
        }

        Ok(Self {
            name: def.name.to_string(),
            icon_prefix: def.icon_prefix.to_string(),
            styles: def
                .styles
                .iter()
                .map(|(name, token)| StyleVariant {
                    name: name.to_string(),
                    token: token.to_string(),
                })
                .collect(),
            legacy_style_tokens: def.legacy_style_tokens.iter().map(|t| t.to_string()).collect(),
            metadata_available: def.metadata_available,
            selector_styles: def.selector_styles.iter().map(|s| s.to_string()).collect(),
            url_patterns,
            body_patterns,
            extraction_patterns,
        })
    }

    pub fn url_patterns(&self) -> &[Regex] {
        &self.url_patterns
    }

    pub fn body_patterns(&self) -> &[Regex] {
        &self.body_patterns
    }

    pub fn extraction_patterns(&self) -> &[Regex] {
        &self.extraction_patterns
    }

    /// Whether any URL pattern matches a stylesheet address.
    pub fn matches_url(&self, url: &str) -> bool {
        self.url_patterns.iter().any(|re| re.is_match(url))
    }

    /// Whether any body pattern matches raw stylesheet text.
    pub fn matches_body(&self, css: &str) -> bool {
        self.body_patterns.iter().any(|re| re.is_match(css))
    }

    /// Look up a style variant by name.
    pub fn style(&self, name: &str) -> Option<&StyleVariant> {
        self.styles.iter().find(|s| s.name == name)
    }

    /// Fully-qualified class for one icon in one style.
    ///
    /// Single-prefix styles (token equal to the icon prefix) come out as
    /// `ph ph-heart`; the rest as `fa-solid fa-star`.
    pub fn qualified_class(&self, style: &StyleVariant, icon_name: &str) -> String {
        format!("{} {}-{}", style.token, self.icon_prefix, icon_name)
    }

    /// Whether a captured name is really one of this library's style classes.
    pub fn is_style_name(&self, capture: &str) -> bool {
        if self.selector_styles.iter().any(|s| s == capture) {
            return true;
        }
        self.styles.iter().any(|s| {
            s.name == capture
                || s.token == capture
                || s
                    .token
                    .strip_prefix(&self.icon_prefix)
                    .and_then(|rest| rest.strip_prefix('-'))
                    .is_some_and(|rest| rest == capture)
        })
    }

    /// Style variant a fully-qualified class belongs to, if any.
    pub fn style_of(&self, icon_class: &str) -> Option<&StyleVariant> {
        let first = icon_class.split_whitespace().next()?;
        self.styles.iter().find(|s| s.token == first)
    }
}

/// An ordered, immutable set of icon libraries.
#[derive(Debug)]
pub struct LibraryRegistry {
    libraries: Vec<IconLibrary>,
    normalizer: DisplayNormalizer,
}

impl LibraryRegistry {
    /// Build a registry, enforcing the descriptor invariants.
    pub fn new(libraries: Vec<IconLibrary>) -> PickerResult<Self> {
        if libraries.is_empty() {
            return Err(PickerError::InvalidRegistry(
                "registry must contain at least one library".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for lib in &libraries {
            if !seen.insert(lib.name.to_lowercase()) {
                return Err(PickerError::InvalidRegistry(format!(
                    "duplicate library name '{}'",
                    lib.name
                )));
            }
            if lib.styles.is_empty() {
                return Err(PickerError::InvalidRegistry(format!(
                    "{} declares no styles",
                    lib.name
                )));
            }
            if !lib.metadata_available && lib.extraction_patterns.is_empty() {
                return Err(PickerError::InvalidRegistry(format!(
                    "{} has no extraction patterns and no icon manifest",
                    lib.name
                )));
            }
        }

        let normalizer = DisplayNormalizer::new(&libraries)?;
        Ok(Self {
            libraries,
            normalizer,
        })
    }

    /// Compile and register a table of definitions.
    pub fn from_definitions(defs: &[LibraryDefinition]) -> PickerResult<Self> {
        let libraries = defs
            .iter()
            .map(IconLibrary::compile)
            .collect::<PickerResult<Vec<_>>>()?;
        Self::new(libraries)
    }

    /// The built-in registry.
    pub fn builtin() -> &'static LibraryRegistry {
        &BUILTIN
    }

    pub fn iter(&self) -> impl Iterator<Item = &IconLibrary> {
        self.libraries.iter()
    }

    pub fn len(&self) -> usize {
        self.libraries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }

    /// Highest priority library.
    pub fn first(&self) -> &IconLibrary {
        // new() rejects empty tables
        &self.libraries[0]
    }

    pub fn get(&self, name: &str) -> Option<&IconLibrary> {
        self.libraries.iter().find(|lib| lib.name.eq_ignore_ascii_case(name))
    }

    /// Detect the library a stylesheet belongs to.
    ///
    /// The URL is tested against every library first; the CSS body is only
    /// consulted when the URL matches nothing.
    pub fn detect_library(&self, url: &str, css_body: Option<&str>) -> Option<&IconLibrary> {
        self.libraries
            .iter()
            .find(|lib| lib.matches_url(url))
            .or_else(|| {
                let body = css_body?;
                self.libraries.iter().find(|lib| lib.matches_body(body))
            })
    }

    /// Detect a library, applying `fallback` when nothing matches.
    pub fn detect_or_fallback(
        &self,
        url: &str,
        css_body: Option<&str>,
        fallback: DetectionFallback,
    ) -> PickerResult<&IconLibrary> {
        if let Some(lib) = self.detect_library(url, css_body) {
            tracing::debug!(library = %lib.name, url, "Detected icon library");
            return Ok(lib);
        }

        match fallback {
            DetectionFallback::FirstLibrary => {
                let lib = self.first();
                tracing::warn!(url, fallback = %lib.name, "No icon library matched, using fallback");
                Ok(lib)
            }
            DetectionFallback::Strict => Err(PickerError::UnknownLibrary(url.to_string())),
        }
    }

    /// Short human-readable label for a fully-qualified class.
    pub fn clean_display_name(&self, icon_class: &str) -> String {
        self.normalizer.clean(icon_class)
    }
}
