//! Offline icon manifests.
//!
//! Libraries with `metadata_available` ship a precomputed `icons.json`
//! listing every icon and the styles it really exists in. When one is
//! supplied, the picker offers exactly those classes instead of assuming
//! every icon exists in every style.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::core::IconLibrary;
use crate::error::{PickerError, PickerResult};

/// One icon's entry in `icons.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestIcon {
    #[serde(default)]
    pub styles: Vec<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub search: Option<ManifestSearch>,
}

/// Search metadata for an icon.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManifestSearch {
    #[serde(default)]
    pub terms: Vec<String>,
}

/// Parsed icon manifest, keyed by icon base name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct IconManifest {
    icons: BTreeMap<String, ManifestIcon>,
}

impl IconManifest {
    pub fn from_json(json: &str) -> PickerResult<Self> {
        serde_json::from_str(json).map_err(|e| PickerError::Manifest(e.to_string()))
    }

    pub fn load(path: &Path) -> PickerResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ManifestIcon> {
        self.icons.get(name)
    }

    /// Classes for every icon in the styles it declares, sorted.
    ///
    /// Styles the library does not know are skipped.
    pub fn icon_classes(&self, library: &IconLibrary) -> PickerResult<Vec<String>> {
        if !library.metadata_available {
            return Err(PickerError::Manifest(format!(
                "{} has no icon manifest",
                library.name
            )));
        }

        let mut classes = BTreeSet::new();
        for (name, icon) in &self.icons {
            for style in icon.styles.iter().filter_map(|s| library.style(s)) {
                classes.insert(library.qualified_class(style, name));
            }
        }

        Ok(classes.into_iter().collect())
    }
}
