use crate::classify::ExportKind;
use crate::name::strip_extension;
use serde::Serialize;
use std::path::PathBuf;

/// A component file discovered by a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentDescriptor {
    /// Path to the source file
    pub absolute_path: PathBuf,

    /// Path relative to the scanned root, `/`-separated
    pub relative_path: String,

    /// Base name including extension
    pub filename: String,

    /// Identifier derived from the file name (may be empty)
    pub component_name: String,

    /// Detected export style
    pub export_kind: ExportKind,

    /// Parent directory of `relative_path`, empty for top-level files
    pub directory: String,

    /// The scanned root this component belongs to
    pub root_folder: PathBuf,
}

impl ComponentDescriptor {
    /// Creates a descriptor, normalizing separators in `relative_path`.
    #[must_use]
    pub fn new(
        root_folder: PathBuf,
        absolute_path: PathBuf,
        relative_path: &str,
        component_name: String,
        export_kind: ExportKind,
    ) -> Self {
        let relative_path = relative_path.replace('\\', "/");
        let (directory, filename) = match relative_path.rfind('/') {
            Some(pos) => (
                relative_path[..pos].to_string(),
                relative_path[pos + 1..].to_string(),
            ),
            None => (String::new(), relative_path.clone()),
        };

        Self {
            absolute_path,
            relative_path,
            filename,
            component_name,
            export_kind,
            directory,
            root_folder,
        }
    }

    /// Module specifier used in the index file, e.g. `./ui/modal`.
    #[must_use]
    pub fn module_specifier(&self) -> String {
        let normalized = self.relative_path.replace('\\', "/");
        format!("./{}", strip_extension(&normalized))
    }
}
