use crate::error::{Error, Result};
use crate::filter::DirectoryFilter;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Component file suffixes picked up when none are configured.
pub const DEFAULT_FILE_EXTENSIONS: [&str; 4] = [".tsx", ".jsx", ".ts", ".js"];

/// Style of the generated export statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportStyle {
    /// `export { Name } from './path'`, sorted by component name
    #[default]
    Named,
    /// `export * from './path'`, sorted by relative path
    Reexport,
}

impl ExportStyle {
    /// Returns the identifier used in settings files and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Named => "named",
            Self::Reexport => "reexport",
        }
    }
}

impl fmt::Display for ExportStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extension of the generated index module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModuleExtension {
    /// `index.ts`
    #[default]
    Ts,
    /// `index.js`
    Js,
}

impl ModuleExtension {
    /// Picks `.ts` or `.js` from the "use TypeScript" preference.
    #[must_use]
    pub const fn from_typescript(use_typescript: bool) -> Self {
        if use_typescript { Self::Ts } else { Self::Js }
    }

    /// Returns the extension including the leading dot.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ts => ".ts",
            Self::Js => ".js",
        }
    }

    /// Returns true for the TypeScript extension.
    #[must_use]
    pub const fn is_typescript(self) -> bool {
        matches!(self, Self::Ts)
    }
}

impl fmt::Display for ModuleExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings for one scan/generate run.
///
/// Use [`GenerationConfig::builder()`] to construct a new configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct GenerationConfig {
    /// Extension of the generated index file
    pub module_extension: ModuleExtension,

    /// Export statement style
    pub export_style: ExportStyle,

    /// Filename suffixes that mark a component file (case-sensitive)
    pub file_extensions: Vec<String>,

    /// Extra glob patterns for directories to prune while scanning
    pub exclude_directories: Vec<String>,
}

impl GenerationConfig {
    /// Creates a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use barrel_gen::{ExportStyle, GenerationConfig, ModuleExtension};
    ///
    /// let config = GenerationConfig::builder()
    ///     .export_style(ExportStyle::Reexport)
    ///     .module_extension(ModuleExtension::Js)
    ///     .build()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(config.index_filename(), "index.js");
    /// ```
    #[must_use]
    pub fn builder() -> GenerationConfigBuilder {
        GenerationConfigBuilder::default()
    }

    /// Name of the index file written at the top of each root.
    #[must_use]
    pub fn index_filename(&self) -> String {
        format!("index{}", self.module_extension)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No file extensions are configured
    /// - An extension is empty
    /// - An exclude pattern is not a valid glob
    pub fn validate(&self) -> Result<()> {
        if self.file_extensions.is_empty() {
            return Err(Error::config("at least one file extension is required"));
        }

        if self.file_extensions.iter().any(String::is_empty) {
            return Err(Error::config("file extensions must not be empty"));
        }

        DirectoryFilter::new(&self.exclude_directories)?;

        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            module_extension: ModuleExtension::Ts,
            export_style: ExportStyle::Named,
            file_extensions: default_file_extensions(),
            exclude_directories: Vec::new(),
        }
    }
}

/// Builder for creating a [`GenerationConfig`].
#[derive(Debug, Default)]
pub struct GenerationConfigBuilder {
    module_extension: Option<ModuleExtension>,
    export_style: Option<ExportStyle>,
    file_extensions: Option<Vec<String>>,
    exclude_directories: Vec<String>,
}

impl GenerationConfigBuilder {
    /// Sets the index module extension.
    #[must_use]
    pub fn module_extension(mut self, extension: ModuleExtension) -> Self {
        self.module_extension = Some(extension);
        self
    }

    /// Shorthand for `.ts` (true) or `.js` (false).
    #[must_use]
    pub fn use_typescript(self, enabled: bool) -> Self {
        self.module_extension(ModuleExtension::from_typescript(enabled))
    }

    /// Sets the export statement style.
    #[must_use]
    pub fn export_style(mut self, style: ExportStyle) -> Self {
        self.export_style = Some(style);
        self
    }

    /// Replaces the component file suffixes.
    ///
    /// Duplicates are dropped, first occurrence wins.
    #[must_use]
    pub fn file_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for ext in extensions {
            let ext = ext.into();
            if !unique.contains(&ext) {
                unique.push(ext);
            }
        }
        self.file_extensions = Some(unique);
        self
    }

    /// Adds glob patterns for directories to skip while scanning.
    #[must_use]
    pub fn exclude_directories<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_directories
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn build(self) -> Result<GenerationConfig> {
        let config = GenerationConfig {
            module_extension: self.module_extension.unwrap_or_default(),
            export_style: self.export_style.unwrap_or_default(),
            file_extensions: self
                .file_extensions
                .unwrap_or_else(default_file_extensions),
            exclude_directories: self.exclude_directories,
        };

        config.validate()?;
        Ok(config)
    }
}

/// Returns the default component suffixes as owned strings.
#[must_use]
pub fn default_file_extensions() -> Vec<String> {
    DEFAULT_FILE_EXTENSIONS
        .iter()
        .map(|ext| (*ext).to_string())
        .collect()
}
