//! Configuration file support.
//!
//! The configuration carries user preferences and the option catalogs that
//! classification panels are built from. It is stored as JSON under the
//! platform config directory.

use serde::{Deserialize, Serialize};

use crate::color_utils::parse_hex;
use crate::error::CatalogError;
use crate::marker::{DEFAULT_MARKER_COLOR, MarkerStyle};
use crate::model::{
    Catalog, CatalogKind, CatalogOption, Catalogs, DEFAULT_MARKER_RADIUS,
    default_component_options, default_damage_type_options, default_material_options,
    default_severity_options,
};

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Annotator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatorConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Application name (for identification)
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,

    /// Option catalogs
    #[serde(default)]
    pub catalogs: CatalogsConfig,
}

fn default_app_name() -> String {
    "Damage Annotator".to_string()
}

/// User preferences section of the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Name recorded as the author of new annotations
    #[serde(default = "default_annotator")]
    pub annotator: String,

    /// Marker radius in percent of the image
    #[serde(default = "default_marker_radius")]
    pub marker_radius: f32,

    /// Marker color used when no severity is chosen
    #[serde(default = "default_marker_color")]
    pub marker_color: String,
}

fn default_annotator() -> String {
    "inspector".to_string()
}

fn default_marker_radius() -> f32 {
    DEFAULT_MARKER_RADIUS
}

fn default_marker_color() -> String {
    DEFAULT_MARKER_COLOR.to_string()
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            annotator: default_annotator(),
            marker_radius: default_marker_radius(),
            marker_color: default_marker_color(),
        }
    }
}

/// Catalog section of the config. Missing lists fall back to the built-in defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogsConfig {
    #[serde(default = "default_component_options")]
    pub component: Vec<CatalogOption>,
    #[serde(default = "default_material_options")]
    pub material: Vec<CatalogOption>,
    #[serde(default = "default_damage_type_options")]
    pub damage_type: Vec<CatalogOption>,
    #[serde(default = "default_severity_options")]
    pub severity: Vec<CatalogOption>,
}

impl Default for CatalogsConfig {
    fn default() -> Self {
        Self {
            component: default_component_options(),
            material: default_material_options(),
            damage_type: default_damage_type_options(),
            severity: default_severity_options(),
        }
    }
}

impl CatalogsConfig {
    /// Validate the option lists into catalogs.
    pub fn to_catalogs(&self) -> Result<Catalogs, CatalogError> {
        Ok(Catalogs {
            component: Catalog::new(CatalogKind::Component, self.component.clone())?,
            material: Catalog::new(CatalogKind::Material, self.material.clone())?,
            damage_type: Catalog::new(CatalogKind::DamageType, self.damage_type.clone())?,
            severity: Catalog::new(CatalogKind::Severity, self.severity.clone())?,
        })
    }
}

impl AnnotatorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            app_name: default_app_name(),
            preferences: Preferences::default(),
            catalogs: CatalogsConfig::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Build validated catalogs from the config.
    pub fn catalogs(&self) -> Result<Catalogs, ConfigError> {
        Ok(self.catalogs.to_catalogs()?)
    }

    /// Build the marker style, validating radius and color.
    pub fn marker_style(&self) -> Result<MarkerStyle, ConfigError> {
        let prefs = &self.preferences;
        if !(prefs.marker_radius.is_finite() && prefs.marker_radius > 0.0) {
            return Err(ConfigError::InvalidPreference(format!(
                "marker_radius must be positive, got {}",
                prefs.marker_radius
            )));
        }
        if parse_hex(&prefs.marker_color).is_none() {
            return Err(ConfigError::InvalidPreference(format!(
                "marker_color must be #RRGGBB, got '{}'",
                prefs.marker_color
            )));
        }
        Ok(MarkerStyle {
            radius: prefs.marker_radius,
            color: prefs.marker_color.clone(),
        })
    }

    /// Get the default filename for the config file.
    pub fn default_filename() -> &'static str {
        "damage-annotator.json"
    }

    /// Get the default config file path.
    /// Returns None on WASM (no filesystem access).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            Some(
                config_dir
                    .join("damage-annotator")
                    .join(Self::default_filename()),
            )
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("damage-annotator")
                    .join(Self::default_filename())
            })
        }
    }

    /// Load configuration from a file.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match Self::load(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("Failed to load config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Save configuration to a file, creating parent directories.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Save configuration to the default path.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_default_path(&self) -> Result<(), ConfigError> {
        let path = Self::default_path().ok_or_else(|| {
            ConfigError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })?;
        self.save(&path)
    }
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A configured catalog is invalid
    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CatalogError),

    /// A preference has an unusable value
    #[error("Invalid preference: {0}")]
    InvalidPreference(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OptionKey;

    #[test]
    fn test_default_config_round_trip() {
        let config = AnnotatorConfig::new();
        let json = config.to_json().unwrap();
        let parsed = AnnotatorConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
        assert_eq!(parsed.catalogs().unwrap(), Catalogs::vehicle_defaults());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = AnnotatorConfig::from_json(r#"{ "version": 1 }"#).unwrap();
        assert_eq!(config.app_name, "Damage Annotator");
        assert_eq!(config.preferences, Preferences::default());
        assert_eq!(config.catalogs, CatalogsConfig::default());
    }

    #[test]
    fn test_custom_catalog_section() {
        let json = r#"{
            "version": 1,
            "preferences": { "log_level": "debug", "annotator": "sam" },
            "catalogs": {
                "material": [
                    { "id": "P", "label": "PAINT", "value": "paint" },
                    { "id": "S", "label": "STEEL", "value": "steel" }
                ]
            }
        }"#;
        let config = AnnotatorConfig::from_json(json).unwrap();
        assert_eq!(config.preferences.log_level, LogLevel::Debug);
        assert_eq!(config.preferences.annotator, "sam");

        let catalogs = config.catalogs().unwrap();
        assert_eq!(catalogs.material.len(), 2);
        assert!(catalogs.material.contains(&OptionKey::from("S")));
        assert_eq!(catalogs.severity, Catalogs::vehicle_defaults().severity);
    }

    #[test]
    fn test_version_too_new() {
        let result = AnnotatorConfig::from_json(r#"{ "version": 99 }"#);
        assert!(matches!(
            result,
            Err(ConfigError::VersionTooNew {
                file_version: 99,
                ..
            })
        ));
    }

    #[test]
    fn test_duplicate_catalog_ids_rejected() {
        let mut config = AnnotatorConfig::new();
        config.catalogs.severity.push(CatalogOption::numbered(1, "Again"));
        assert!(matches!(config.catalogs(), Err(ConfigError::Catalog(_))));
    }

    #[test]
    fn test_marker_style_validation() {
        let mut config = AnnotatorConfig::new();
        assert_eq!(config.marker_style().unwrap(), MarkerStyle::default());

        config.preferences.marker_color = "red".to_string();
        assert!(matches!(
            config.marker_style(),
            Err(ConfigError::InvalidPreference(_))
        ));

        config.preferences.marker_color = "#00ff00".to_string();
        config.preferences.marker_radius = 0.0;
        assert!(config.marker_style().is_err());
    }

    #[test]
    fn test_log_level_filter() {
        assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
        assert_eq!(LogLevel::default().to_level_filter(), log::LevelFilter::Info);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_save_and_load_file() {
        let dir = std::env::temp_dir().join(format!("damage-annotator-test-{}", std::process::id()));
        let path = dir.join("nested").join(AnnotatorConfig::default_filename());

        let mut config = AnnotatorConfig::new();
        config.preferences.annotator = "file-test".to_string();
        config.save(&path).unwrap();

        let loaded = AnnotatorConfig::load(&path).unwrap();
        assert_eq!(loaded.preferences.annotator, "file-test");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
