//! Directory pruning and component file matching.
//!
//! A directory is pruned when its name starts with `.`, when it is the
//! package cache directory (`node_modules`), or when it matches one of the
//! configured exclusion globs. Pruned directories are never descended into.

use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;

/// Package cache directory that is always skipped.
pub const EXCLUDED_DIRECTORY: &str = "node_modules";

#[derive(Debug, Clone)]
pub(crate) struct DirectoryFilter {
    patterns: GlobSet,
}

impl DirectoryFilter {
    /// Compiles the extra exclusion patterns.
    pub(crate) fn new(patterns: &[String]) -> Result<Self> {
        Ok(Self {
            patterns: Self::build_globset(patterns)?,
        })
    }

    /// A filter with only the fixed rule.
    pub(crate) fn empty() -> Self {
        Self {
            patterns: GlobSet::empty(),
        }
    }

    fn build_globset(patterns: &[String]) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();

        for pattern in patterns {
            let glob =
                Glob::new(pattern).map_err(|e| Error::invalid_pattern(pattern, e.to_string()))?;
            builder.add(glob);
        }

        builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build glob set: {e}")))
    }

    /// Returns true if the walker may enter this directory.
    ///
    /// `relative` is the directory path relative to the scanned root.
    pub(crate) fn should_descend(&self, relative: &Path, name: &str) -> bool {
        if is_pruned_name(name) {
            return false;
        }

        !(self.patterns.is_match(relative) || self.patterns.is_match(name))
    }
}

/// Fixed pruning rule shared by every scan.
pub(crate) fn is_pruned_name(name: &str) -> bool {
    name.starts_with('.') || name == EXCLUDED_DIRECTORY
}

/// Suffix match of a file name against the configured extensions.
pub(crate) fn matches_extension(file_name: &str, extensions: &[String]) -> bool {
    extensions.iter().any(|ext| file_name.ends_with(ext.as_str()))
}
