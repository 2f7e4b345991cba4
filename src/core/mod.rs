//! Core engine module - icon library detection and extraction.
//!
//! Everything here is pure and synchronous:
//! - Library registry and detection
//! - CSS icon extraction
//! - Display-name normalization
//! - Filtering and ranking over extracted icons

pub mod display;
pub mod extract;
pub mod registry;
pub mod search;

#[cfg(test)]
mod fixtures;

pub use display::{clean_icon_name_for_display, DisplayNormalizer};
pub use extract::{expand_styles, extract_base_names, extract_icons};
pub use registry::{
    DetectionFallback, IconLibrary, LibraryDefinition, LibraryRegistry, StyleVariant,
    BUILTIN_LIBRARIES,
};
pub use search::IconFilter;
