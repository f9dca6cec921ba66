//! Persisted user preferences.
//!
//! The settings file is a small JSON document kept between runs by the
//! command-line front-end. The library itself only ever consumes the
//! resulting [`GenerationConfig`].

use crate::{
    config::{default_file_extensions, ExportStyle, GenerationConfig, ModuleExtension},
    error::{Error, Result},
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Settings file looked up in the working directory by default.
pub const DEFAULT_SETTINGS_FILE: &str = "index_generator_config.json";

/// Preferences remembered between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Folder most recently added
    pub last_directory: Option<PathBuf>,

    /// Component file suffixes
    pub file_extensions: Vec<String>,

    /// Export statement style
    pub export_style: ExportStyle,

    /// Write `index.ts` instead of `index.js`
    pub use_typescript: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            last_directory: None,
            file_extensions: default_file_extensions(),
            export_style: ExportStyle::Named,
            use_typescript: true,
        }
    }
}

impl Settings {
    /// Loads settings, falling back to defaults.
    ///
    /// A missing file is normal on first use; a malformed file is logged
    /// and ignored.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                debug!("No settings loaded from {}: {}", path.display(), e);
                return Self::default();
            }
        };

        serde_json::from_str(&text).unwrap_or_else(|e| {
            warn!("Ignoring malformed settings file {}: {}", path.display(), e);
            Self::default()
        })
    }

    /// Writes the settings as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| Error::io(path, e))?;

        debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Index module extension selected by these settings.
    #[must_use]
    pub const fn module_extension(&self) -> ModuleExtension {
        ModuleExtension::from_typescript(self.use_typescript)
    }

    /// Builds a generation configuration from these settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored extensions are invalid.
    pub fn to_config(&self) -> Result<GenerationConfig> {
        GenerationConfig::builder()
            .module_extension(self.module_extension())
            .export_style(self.export_style)
            .file_extensions(self.file_extensions.iter().cloned())
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = assert_fs::TempDir::new().unwrap();

        let settings = Settings::load(&temp.path().join(DEFAULT_SETTINGS_FILE));

        assert_eq!(settings, Settings::default());
        assert!(settings.use_typescript);
        assert_eq!(settings.file_extensions, vec![".tsx", ".jsx", ".ts", ".js"]);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child(DEFAULT_SETTINGS_FILE);
        file.write_str(r#"{"export_style": "reexport", "use_typescript": false}"#)
            .unwrap();

        let settings = Settings::load(file.path());

        assert_eq!(settings.export_style, ExportStyle::Reexport);
        assert_eq!(settings.module_extension(), ModuleExtension::Js);
        assert_eq!(settings.file_extensions, default_file_extensions());
        assert_eq!(settings.last_directory, None);
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child(DEFAULT_SETTINGS_FILE);
        file.write_str("{ not json").unwrap();

        assert_eq!(Settings::load(file.path()), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let temp = assert_fs::TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_SETTINGS_FILE);
        let settings = Settings {
            last_directory: Some(PathBuf::from("/app/components")),
            file_extensions: vec![".tsx".to_string()],
            export_style: ExportStyle::Reexport,
            use_typescript: false,
        };

        settings.save(&path).unwrap();
        let text = fs::read_to_string(&path).unwrap();

        assert!(text.contains("\"export_style\": \"reexport\""));
        assert_eq!(Settings::load(&path), settings);
    }

    #[test]
    fn test_to_config() {
        let settings = Settings {
            use_typescript: false,
            export_style: ExportStyle::Reexport,
            ..Settings::default()
        };

        let config = settings.to_config().unwrap();

        assert_eq!(config.index_filename(), "index.js");
        assert_eq!(config.export_style, ExportStyle::Reexport);
    }

    #[test]
    fn test_to_config_rejects_empty_extensions() {
        let settings = Settings {
            file_extensions: Vec::new(),
            ..Settings::default()
        };

        assert!(settings.to_config().is_err());
    }
}
