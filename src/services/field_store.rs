//! Field value storage.
//!
//! The host platform owns field values; the picker only reads the current
//! value and writes a new one when the user picks an icon. A JSON file
//! backed store stands in for the host when running from the command line.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::PickerResult;

/// Read/write access to one field's value.
pub trait FieldValueStore {
    fn get_value(&self) -> Option<String>;
    fn set_value(&mut self, value: &str) -> PickerResult<()>;
}

/// In-memory field value.
#[derive(Debug, Clone, Default)]
pub struct MemoryFieldStore {
    value: Option<String>,
}

impl MemoryFieldStore {
    pub fn new(value: Option<String>) -> Self {
        Self { value }
    }
}

impl FieldValueStore for MemoryFieldStore {
    fn get_value(&self) -> Option<String> {
        self.value.clone()
    }

    fn set_value(&mut self, value: &str) -> PickerResult<()> {
        self.value = Some(value.to_string());
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct FieldFile {
    #[serde(default)]
    value: Option<String>,
}

/// Field value persisted to a JSON file.
///
/// The file is read once on creation and rewritten on every change.
#[derive(Debug)]
pub struct JsonFieldStore {
    path: PathBuf,
    value: Option<String>,
}

impl JsonFieldStore {
    /// Open the store at `path`. A missing or unreadable file means no value.
    pub fn open(path: PathBuf) -> Self {
        let value = fs::read_to_string(&path)
            .ok()
            .and_then(|content| serde_json::from_str::<FieldFile>(&content).ok())
            .and_then(|file| file.value);

        Self { path, value }
    }
}

impl FieldValueStore for JsonFieldStore {
    fn get_value(&self) -> Option<String> {
        self.value.clone()
    }

    fn set_value(&mut self, value: &str) -> PickerResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = FieldFile {
            value: Some(value.to_string()),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&file)?)?;
        self.value = Some(value.to_string());
        Ok(())
    }
}
