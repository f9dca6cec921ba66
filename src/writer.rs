use crate::error::{Error, Result};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::{debug, trace};

/// Writes index files in a single step.
///
/// # Process
///
/// 1. Writes content to a sibling temporary file
/// 2. Syncs the temporary file to disk
/// 3. Renames the temporary file over the target path
///
/// A reader therefore sees either the old file, no file, or the complete
/// new content. The temporary file is removed if any step fails.
///
/// If `path` is a symlink, the file it points to is replaced and the link
/// is left in place. The permissions of an existing target are kept.
pub(crate) fn write_file_atomic(path: &Path, content: &str) -> Result<()> {
    let target = resolve_target(path);
    if target.as_path() != path {
        trace!("{} is a symlink to {}", path.display(), target.display());
    }
    let temp_path = temp_path_for(&target);

    let result = write_and_rename(&temp_path, &target, path, content);
    if result.is_err() && temp_path.exists() {
        trace!("Removing leftover temporary file {}", temp_path.display());
        let _ = fs::remove_file(&temp_path);
    }
    result?;

    debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

fn write_and_rename(temp_path: &Path, target: &Path, path: &Path, content: &str) -> Result<()> {
    let mut temp_file = fs::File::create(temp_path).map_err(|e| Error::io(path, e))?;

    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| Error::io(path, e))?;

    temp_file.sync_all().map_err(|e| Error::io(path, e))?;

    drop(temp_file);

    if let Ok(existing) = fs::metadata(target) {
        fs::set_permissions(temp_path, existing.permissions()).map_err(|e| Error::io(path, e))?;
    }

    fs::rename(temp_path, target).map_err(|e| Error::io(path, e))
}

/// Follows a symlink at `path` to the file it names. A dangling link
/// resolves to its target path so the target gets created.
fn resolve_target(path: &Path) -> PathBuf {
    let is_symlink = fs::symlink_metadata(path)
        .map(|meta| meta.file_type().is_symlink())
        .unwrap_or(false);
    if !is_symlink {
        return path.to_path_buf();
    }

    fs::canonicalize(path)
        .or_else(|_| {
            fs::read_link(path).map(|link| match path.parent() {
                Some(parent) => parent.join(link),
                None => link,
            })
        })
        .unwrap_or_else(|_| path.to_path_buf())
}

/// `index.ts` → `.index.ts.tmp` in the same directory.
fn temp_path_for(path: &Path) -> PathBuf {
    let filename = path
        .file_name()
        .map_or_else(|| "index".into(), |name| name.to_string_lossy());
    path.with_file_name(format!(".{filename}.tmp"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn test_write_creates_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let index = temp.child("index.ts");

        write_file_atomic(index.path(), "export * from './card'").unwrap();

        assert_eq!(fs::read_to_string(index.path()).unwrap(), "export * from './card'");
        assert!(!temp.child(".index.ts.tmp").exists());
    }

    #[test]
    fn test_write_replaces_existing_content() {
        let temp = assert_fs::TempDir::new().unwrap();
        let index = temp.child("index.js");
        index.write_str("old content that is longer than the new one").unwrap();

        write_file_atomic(index.path(), "new").unwrap();

        assert_eq!(fs::read_to_string(index.path()).unwrap(), "new");
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let temp = assert_fs::TempDir::new().unwrap();
        let index = temp.child("gone/index.ts");

        let err = write_file_atomic(index.path(), "x").unwrap_err();

        assert!(err.is_io());
        assert!(err.to_string().contains("index.ts"));
        assert!(!index.exists());
    }

    #[test]
    fn test_failed_rename_cleans_up_temp_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("index.ts/keep.txt").write_str("occupied").unwrap();

        let result = write_file_atomic(&temp.path().join("index.ts"), "x");

        assert!(result.is_err());
        assert!(!temp.child(".index.ts.tmp").exists());
        assert_eq!(
            fs::read_to_string(temp.child("index.ts/keep.txt").path()).unwrap(),
            "occupied"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_write_through_symlink_keeps_link() {
        let temp = assert_fs::TempDir::new().unwrap();
        let real = temp.child("shared/index.ts");
        real.write_str("// target").unwrap();
        temp.child("ui").create_dir_all().unwrap();
        let link = temp.child("ui/index.ts");
        link.symlink_to_file(real.path()).unwrap();

        write_file_atomic(link.path(), "export * from './card'").unwrap();

        assert!(fs::symlink_metadata(link.path()).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(real.path()).unwrap(), "export * from './card'");
        assert!(!temp.child("ui/.index.ts.tmp").exists());
        assert!(!temp.child("shared/.index.ts.tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_write_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp = assert_fs::TempDir::new().unwrap();
        let index = temp.child("index.ts");
        index.write_str("old").unwrap();
        fs::set_permissions(index.path(), fs::Permissions::from_mode(0o640)).unwrap();

        write_file_atomic(index.path(), "new").unwrap();

        let mode = fs::metadata(index.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let path = Path::new("/app/components/index.ts");
        assert_eq!(temp_path_for(path), Path::new("/app/components/.index.ts.tmp"));
    }
}
