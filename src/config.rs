use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::DetectionFallback;
use crate::error::{PickerError, PickerResult};

/// Environment override for the stored CSS URL.
pub const CSS_URL_ENV: &str = "ICONFONT_CSS_URL";

/// Parameters persisted by the host when the app is installed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallationParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_font_css_url: Option<String>,
}

impl InstallationParameters {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            icon_font_css_url: Some(url.into()),
        }
    }

    /// The configured URL, ignoring blank values.
    pub fn css_url(&self) -> Option<&str> {
        non_blank(self.icon_font_css_url.as_deref())
    }
}

/// Parameters the field renderer passes when opening the picker dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogInvocation {
    #[serde(default)]
    pub selected: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_font_css_url: Option<String>,
}

impl DialogInvocation {
    /// URL the dialog should load: installation parameters first, then the
    /// invocation's own value.
    pub fn resolve_css_url(&self, install: &InstallationParameters) -> Option<String> {
        install
            .css_url()
            .or_else(|| non_blank(self.icon_font_css_url.as_deref()))
            .map(str::to_string)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Installation config screen state.
#[derive(Debug, Clone, Default)]
pub struct ConfigScreen {
    parameters: InstallationParameters,
    touched: bool,
}

impl ConfigScreen {
    /// Start from the parameters currently stored by the host.
    pub fn load(current: Option<InstallationParameters>) -> Self {
        Self {
            parameters: current.unwrap_or_default(),
            touched: false,
        }
    }

    pub fn parameters(&self) -> &InstallationParameters {
        &self.parameters
    }

    /// Update the URL from user input.
    pub fn set_css_url(&mut self, raw: &str) {
        self.parameters.icon_font_css_url = Some(raw.trim().to_string());
        self.touched = true;
    }

    pub fn is_valid(&self) -> bool {
        self.parameters.css_url().is_some()
    }

    /// Whether to show the inline "required" message.
    pub fn show_validation_error(&self) -> bool {
        self.touched && !self.is_valid()
    }

    /// Parameters to persist, or `ConfigurationMissing` if the URL is blank.
    pub fn on_configure(&self) -> PickerResult<InstallationParameters> {
        if !self.is_valid() {
            return Err(PickerError::ConfigurationMissing);
        }
        tracing::info!(url = ?self.parameters.icon_font_css_url, "Saving installation parameters");
        Ok(self.parameters.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub installation: InstallationParameters,
    pub behavior: BehaviorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    pub fallback: DetectionFallback,
    pub fetch_timeout_secs: u64,
    pub max_results: usize,
    /// JSON file standing in for the host's field value store
    pub field_store: Option<String>,
}

#[allow(clippy::derivable_impls)]
impl Default for Config {
    fn default() -> Self {
        Self {
            installation: InstallationParameters::default(),
            behavior: BehaviorConfig::default(),
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            fallback: DetectionFallback::FirstLibrary,
            fetch_timeout_secs: 15,
            max_results: 500,
            field_store: None,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".config"))
                    .unwrap_or_else(|| PathBuf::from("/tmp"))
            })
            .join("iconfont-picker")
            .join("config.toml")
    }

    /// Load config from the default path, or return defaults if not found
    pub fn load() -> Self {
        let mut config = Self::load_from(&Self::config_path());
        config.apply_env();
        config
    }

    /// Load config from `path`, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        let mut config = if path.exists() {
            match Self::read(path) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), "Failed to load config: {}", e);
                    Self::default()
                }
            }
        } else {
            Self::default()
        };

        config.validate();
        config
    }

    fn read(path: &Path) -> PickerResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(CSS_URL_ENV) {
            if !url.trim().is_empty() {
                self.installation.icon_font_css_url = Some(url.trim().to_string());
            }
        }
    }

    /// Validate and clamp config values to acceptable ranges
    fn validate(&mut self) {
        self.behavior.fetch_timeout_secs = self.behavior.fetch_timeout_secs.clamp(1, 120);
        self.behavior.max_results = self.behavior.max_results.clamp(1, 5000);
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<(), String> {
        self.save_to(&Self::config_path())
    }

    /// Save config to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(path, content).map_err(|e| format!("Failed to write config: {}", e))?;

        Ok(())
    }

    /// Field store path, defaulting next to the config file
    pub fn field_store_path(&self) -> PathBuf {
        match &self.behavior.field_store {
            Some(path) => PathBuf::from(path),
            None => Self::config_path().with_file_name("field.json"),
        }
    }
}
