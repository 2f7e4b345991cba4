//! Services the picker talks to: stylesheet fetching, shared stylesheet
//! links, offline icon manifests and field value storage.

pub mod fetch;
pub mod field_store;
pub mod manifest;
pub mod stylesheet;

pub use fetch::{CssFetcher, HttpFetcher, SourceFetcher};
pub use field_store::{FieldValueStore, JsonFieldStore, MemoryFieldStore};
pub use manifest::IconManifest;
pub use stylesheet::{StylesheetLink, StylesheetSet, ICON_FONT_LINK_ID};
