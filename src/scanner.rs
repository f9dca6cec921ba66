use crate::{
    classify::classify_export,
    component::ComponentDescriptor,
    config::GenerationConfig,
    error::Result,
    filter::{matches_extension, DirectoryFilter},
    name::derive_component_name,
};
use serde::Serialize;
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

/// Statistics collected while scanning one root.
#[derive(Debug, Default, Clone)]
pub(crate) struct ScanStats {
    /// Files visited
    files_seen: usize,

    /// Files matching an extension
    candidates: usize,

    /// Candidates dropped because they could not be read as UTF-8
    unreadable: usize,

    /// Walk errors (permissions, vanished entries)
    walk_errors: usize,
}

/// Components found in one scanned root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootScan {
    /// The scanned root folder
    pub root: PathBuf,

    /// Components in traversal order
    pub components: Vec<ComponentDescriptor>,
}

/// Scan output for a set of roots, in the order they were given.
///
/// Every scanned root has an entry, including roots with no components and
/// roots that do not exist, so "scanned and empty" is distinguishable from
/// "not scanned".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScanResult {
    roots: Vec<RootScan>,
}

impl ScanResult {
    /// Creates an empty result.
    #[must_use]
    pub const fn new() -> Self {
        Self { roots: Vec::new() }
    }

    /// Appends a root. Returns false and keeps the earlier entry if the root
    /// is already present.
    pub fn insert(&mut self, root: impl Into<PathBuf>, components: Vec<ComponentDescriptor>) -> bool {
        let root = root.into();
        if self.contains_root(&root) {
            return false;
        }
        self.roots.push(RootScan { root, components });
        true
    }

    /// Components of `root`, or `None` if it was not scanned.
    #[must_use]
    pub fn get(&self, root: &Path) -> Option<&[ComponentDescriptor]> {
        self.roots
            .iter()
            .find(|entry| entry.root == root)
            .map(|entry| entry.components.as_slice())
    }

    /// Returns true if `root` was scanned.
    #[must_use]
    pub fn contains_root(&self, root: &Path) -> bool {
        self.roots.iter().any(|entry| entry.root == root)
    }

    /// Iterates roots in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &RootScan> {
        self.roots.iter()
    }

    /// Number of scanned roots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Returns true if no root was scanned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Number of components across all roots.
    #[must_use]
    pub fn total_components(&self) -> usize {
        self.roots.iter().map(|entry| entry.components.len()).sum()
    }
}

impl<'a> IntoIterator for &'a ScanResult {
    type Item = &'a RootScan;
    type IntoIter = std::slice::Iter<'a, RootScan>;

    fn into_iter(self) -> Self::IntoIter {
        self.roots.iter()
    }
}

/// Walks root folders and collects component descriptors.
#[derive(Debug, Clone)]
pub struct Scanner {
    extensions: Vec<String>,
    directory_filter: DirectoryFilter,
}

impl Scanner {
    /// Creates a scanner from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an exclude pattern is not a valid glob.
    pub fn new(config: &GenerationConfig) -> Result<Self> {
        Ok(Self {
            extensions: config.file_extensions.clone(),
            directory_filter: DirectoryFilter::new(&config.exclude_directories)?,
        })
    }

    /// Creates a scanner that only applies the built-in directory rules.
    #[must_use]
    pub fn with_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
            directory_filter: DirectoryFilter::empty(),
        }
    }

    /// Scans every root in order. Duplicate roots are scanned once.
    pub fn scan<I, P>(&self, roots: I) -> ScanResult
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut result = ScanResult::new();

        for root in roots {
            let root = root.as_ref();
            if result.contains_root(root) {
                debug!("Ignoring duplicate root {}", root.display());
                continue;
            }
            let components = self.scan_root(root);
            result.insert(root, components);
        }

        debug!(
            "Scanned {} roots, {} components",
            result.len(),
            result.total_components()
        );
        result
    }

    /// Scans a single root folder.
    ///
    /// A missing root yields an empty list. Files that cannot be read as
    /// UTF-8 text are left out.
    pub fn scan_root(&self, root: &Path) -> Vec<ComponentDescriptor> {
        if !root.is_dir() {
            debug!("Root {} does not exist, nothing to scan", root.display());
            return Vec::new();
        }

        let mut stats = ScanStats::default();
        let mut components = Vec::new();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by(files_before_directories)
            .into_iter()
            .filter_entry(|entry| self.should_visit(root, entry));

        for result in walker {
            match result {
                Ok(entry) if is_file_entry(&entry) => {
                    stats.files_seen += 1;
                    if let Some(component) = self.process_entry(&entry, root, &mut stats) {
                        components.push(component);
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    debug!("Walk error under {}: {}", root.display(), e);
                    stats.walk_errors += 1;
                }
            }
        }

        debug!(
            "Scan of {} complete: {} files, {} candidates, {} unreadable, {} walk errors",
            root.display(),
            stats.files_seen,
            stats.candidates,
            stats.unreadable,
            stats.walk_errors
        );

        components
    }

    fn should_visit(&self, root: &Path, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }

        let name = entry.file_name().to_string_lossy();
        let relative = pathdiff::diff_paths(entry.path(), root)
            .unwrap_or_else(|| entry.path().to_path_buf());

        let keep = self.directory_filter.should_descend(&relative, &name);
        if !keep {
            trace!("Pruning directory {}", entry.path().display());
        }
        keep
    }

    /// Builds a descriptor for a file entry, or `None` if it is not a
    /// readable component file.
    fn process_entry(
        &self,
        entry: &DirEntry,
        root: &Path,
        stats: &mut ScanStats,
    ) -> Option<ComponentDescriptor> {
        let path = entry.path();
        let Some(file_name) = entry.file_name().to_str() else {
            debug!("Skipping non UTF-8 file name: {}", path.display());
            return None;
        };

        if !matches_extension(file_name, &self.extensions) {
            return None;
        }
        stats.candidates += 1;

        trace!("Processing file: {}", path.display());

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                debug!("Skipping unreadable file {}: {}", path.display(), e);
                stats.unreadable += 1;
                return None;
            }
        };

        let relative_path = pathdiff::diff_paths(path, root)
            .unwrap_or_else(|| path.to_path_buf())
            .to_string_lossy()
            .to_string();

        let component_name = derive_component_name(file_name);
        let export_kind = classify_export(&content, &component_name);

        Some(ComponentDescriptor::new(
            root.to_path_buf(),
            path.to_path_buf(),
            &relative_path,
            component_name,
            export_kind,
        ))
    }
}

/// Regular files, and symlinks whose target is a file. Symlinked
/// directories are never descended into.
fn is_file_entry(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

/// Sibling order: files first, then directories, each by name.
fn files_before_directories(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ExportKind;
    use assert_fs::prelude::*;

    fn default_scanner() -> Scanner {
        Scanner::new(&GenerationConfig::default()).unwrap()
    }

    fn relative_paths(components: &[ComponentDescriptor]) -> Vec<&str> {
        components.iter().map(|c| c.relative_path.as_str()).collect()
    }

    #[test]
    fn test_scanner_finds_components() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("user-menu.jsx")
            .write_str("export default function UserMenu() {}")
            .unwrap();
        temp.child("ui/toggle-button.tsx")
            .write_str("export const ToggleButton = () => null")
            .unwrap();
        temp.child("ui/styles.css").write_str(".a {}").unwrap();

        let components = default_scanner().scan_root(temp.path());

        assert_eq!(components.len(), 2);
        let menu = components.iter().find(|c| c.filename == "user-menu.jsx").unwrap();
        assert_eq!(menu.component_name, "UserMenu");
        assert_eq!(menu.export_kind, ExportKind::Default);
        assert_eq!(menu.directory, "");
        assert_eq!(menu.root_folder, temp.path());

        let toggle = components.iter().find(|c| c.filename == "toggle-button.tsx").unwrap();
        assert_eq!(toggle.relative_path, "ui/toggle-button.tsx");
        assert_eq!(toggle.export_kind, ExportKind::Named);
        assert_eq!(toggle.directory, "ui");
    }

    #[test]
    fn test_scanner_prunes_excluded_directories() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("Card.tsx").write_str("export default Card").unwrap();
        temp.child("node_modules/Widget.tsx")
            .write_str("export default Widget")
            .unwrap();
        temp.child(".storybook/Preview.tsx")
            .write_str("export default Preview")
            .unwrap();
        temp.child("nested/node_modules/deep/Other.tsx")
            .write_str("export default Other")
            .unwrap();

        let components = default_scanner().scan_root(temp.path());

        assert_eq!(relative_paths(&components), vec!["Card.tsx"]);
    }

    #[test]
    fn test_scanner_keeps_hidden_files() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child(".eslintrc.js").write_str("module.exports = {}").unwrap();

        let components = default_scanner().scan_root(temp.path());

        assert_eq!(components.len(), 1);
        assert_eq!(components[0].component_name, ".eslintrc");
        assert_eq!(components[0].export_kind, ExportKind::Unknown);
    }

    #[test]
    fn test_scanner_skips_unreadable_files() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("good.tsx").write_str("export default Good").unwrap();
        temp.child("broken.tsx").write_binary(&[0xff, 0xfe, 0x00, 0x81]).unwrap();

        let components = default_scanner().scan_root(temp.path());

        assert_eq!(relative_paths(&components), vec!["good.tsx"]);
    }

    #[test]
    fn test_scanner_missing_root_is_empty() {
        let temp = assert_fs::TempDir::new().unwrap();
        let missing = temp.path().join("does-not-exist");

        let result = default_scanner().scan([&missing]);

        assert_eq!(result.len(), 1);
        assert_eq!(result.get(&missing), Some(&[][..]));
        assert!(!result.contains_root(temp.path()));
    }

    #[test]
    fn test_scan_keeps_root_order_and_empty_roots() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("b/button.tsx").write_str("export default Button").unwrap();
        temp.child("a/readme.md").write_str("# docs").unwrap();
        let a = temp.child("a");
        let b = temp.child("b");

        let result = default_scanner().scan([b.path(), a.path(), b.path()]);

        let roots: Vec<&Path> = result.iter().map(|entry| entry.root.as_path()).collect();
        assert_eq!(roots, vec![b.path(), a.path()]);
        assert_eq!(result.get(a.path()).map(<[_]>::len), Some(0));
        assert_eq!(result.total_components(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_scanner_follows_symlinked_files_only() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("shared/real-card.tsx")
            .write_str("export default RealCard")
            .unwrap();
        temp.child("shared/nested/Deep.tsx").write_str("export default Deep").unwrap();
        temp.child("ui/Button.tsx").write_str("export default Button").unwrap();
        temp.child("ui/linked-card.tsx")
            .symlink_to_file(temp.child("shared/real-card.tsx").path())
            .unwrap();
        temp.child("ui/linked-dir")
            .symlink_to_dir(temp.child("shared/nested").path())
            .unwrap();

        let components = default_scanner().scan_root(temp.child("ui").path());

        assert_eq!(relative_paths(&components), vec!["Button.tsx", "linked-card.tsx"]);
        let linked = &components[1];
        assert_eq!(linked.component_name, "LinkedCard");
        assert_eq!(linked.export_kind, ExportKind::Default);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_scanner_skips_non_utf8_file_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("Card.tsx").write_str("export default Card").unwrap();
        let bad_name = OsStr::from_bytes(b"bad-\xff.tsx");
        fs::write(temp.path().join(bad_name), "export default Bad").unwrap();

        let components = default_scanner().scan_root(temp.path());

        assert_eq!(relative_paths(&components), vec!["Card.tsx"]);
    }

    #[test]
    fn test_scanner_custom_extensions() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("Card.vue").write_str("export default {}").unwrap();
        temp.child("Card.tsx").write_str("export default Card").unwrap();

        let components = Scanner::with_extensions([".vue"]).scan_root(temp.path());

        assert_eq!(relative_paths(&components), vec!["Card.vue"]);
    }

    #[test]
    fn test_scanner_exclude_patterns() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("atoms/Icon.tsx").write_str("export default Icon").unwrap();
        temp.child("atoms/__tests__/Icon.test.tsx").write_str("test()").unwrap();
        temp.child("stories/Icon.stories.tsx").write_str("export default {}").unwrap();

        let config = GenerationConfig::builder()
            .exclude_directories(["__tests__", "stories"])
            .build()
            .unwrap();
        let components = Scanner::new(&config).unwrap().scan_root(temp.path());

        assert_eq!(relative_paths(&components), vec!["atoms/Icon.tsx"]);
    }

    #[test]
    fn test_files_listed_before_subdirectories() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("a/inner.tsx").write_str("").unwrap();
        temp.child("z.tsx").write_str("").unwrap();
        temp.child("b.tsx").write_str("").unwrap();

        let components = default_scanner().scan_root(temp.path());

        assert_eq!(relative_paths(&components), vec!["b.tsx", "z.tsx", "a/inner.tsx"]);
    }
}
