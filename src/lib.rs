//! iconfont-picker - icon-font detection, extraction and picking.
//!
//! Backs a small set of extension UIs: an installation config screen that
//! stores an icon font stylesheet URL, a picker dialog that lists every icon
//! class the stylesheet defines, and a field renderer that persists the
//! chosen class.
//!
//! # Architecture
//!
//! - [`core`] - Library registry, CSS extraction, display names, filtering
//! - [`picker`] - Picker dialog state machine with stale-fetch guarding
//! - [`field`] - Field renderer that persists a selection
//! - [`config`] - Host parameters, config screen and config file
//! - [`services`] - Fetching, stylesheet links, manifests, field storage
//! - [`cli`] - Command line front end
//!
//! # Example
//!
//! ```ignore
//! use iconfont_picker::{extract_icons, LibraryRegistry};
//!
//! let registry = LibraryRegistry::builtin();
//! let url = "https://use.fontawesome.com/releases/v6.4.0/css/all.css";
//! let library = registry.detect_library(url, None).unwrap();
//! let icons = extract_icons(".fa-solid.fa-star:before{content:\"x\"}", library);
//! assert!(icons.contains(&"fa-solid fa-star".to_string()));
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod field;
pub mod picker;
pub mod services;

mod error;

// Re-export commonly used types for convenience
pub use crate::config::{Config, ConfigScreen, DialogInvocation, InstallationParameters};
pub use crate::core::{
    clean_icon_name_for_display, extract_icons, DetectionFallback, IconLibrary, LibraryRegistry,
};
pub use crate::error::{PickerError, PickerResult};
pub use crate::field::FieldRenderer;
pub use crate::picker::{DialogResult, FetchTicket, PickerDialog, PickerState};
