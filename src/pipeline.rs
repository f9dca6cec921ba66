use crate::{
    config::GenerationConfig,
    error::Result,
    render::{render_index, render_preview},
    scanner::{ScanResult, Scanner},
    writer::write_file_atomic,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Answer to "the index file already exists".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictDecision {
    /// Replace the existing file
    Overwrite,
    /// Leave the existing file and record it as skipped
    Skip,
    /// Stop processing this and all remaining roots
    AbortAll,
}

/// Decides what to do when an index file already exists.
///
/// Implemented for closures and for [`ConflictDecision`] itself, which
/// gives the same answer for every file.
pub trait ConflictPolicy {
    /// Called once per existing index file, in root order.
    fn resolve(&mut self, index_path: &Path) -> ConflictDecision;
}

impl<F> ConflictPolicy for F
where
    F: FnMut(&Path) -> ConflictDecision,
{
    fn resolve(&mut self, index_path: &Path) -> ConflictDecision {
        self(index_path)
    }
}

impl ConflictPolicy for ConflictDecision {
    fn resolve(&mut self, _index_path: &Path) -> ConflictDecision {
        *self
    }
}

/// An index file that could not be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedWrite {
    /// Target index path
    pub path: PathBuf,

    /// Human-readable error message
    pub message: String,
}

/// What a generation run did, root by root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationOutcome {
    /// Index files written
    pub created: Vec<PathBuf>,

    /// Existing index files left untouched
    pub skipped: Vec<PathBuf>,

    /// Index files whose write failed
    pub failed: Vec<FailedWrite>,

    /// True if the conflict policy stopped the run early
    pub aborted: bool,
}

impl GenerationOutcome {
    /// Returns true if nothing was created, skipped or failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.skipped.is_empty() && self.failed.is_empty()
    }

    /// Returns true if at least one write failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Scans roots, previews and writes index files for one configuration.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: GenerationConfig,
    scanner: Scanner,
}

impl Pipeline {
    /// Creates a new pipeline with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails.
    pub fn new(config: GenerationConfig) -> Result<Self> {
        config.validate()?;
        let scanner = Scanner::new(&config)?;

        Ok(Self { config, scanner })
    }

    /// The configuration this pipeline runs with.
    #[must_use]
    pub const fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Scans the roots from scratch.
    pub fn scan<I, P>(&self, roots: I) -> ScanResult
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let start = Instant::now();
        let result = self.scanner.scan(roots);

        info!(
            "Found {} component files in {} folders in {:.2}s",
            result.total_components(),
            result.len(),
            start.elapsed().as_secs_f64()
        );
        result
    }

    /// Renders the combined preview of all non-empty roots.
    #[must_use]
    pub fn preview(&self, scan: &ScanResult) -> String {
        render_preview(scan, self.config.export_style, self.config.module_extension)
    }

    /// Writes one index file per non-empty root.
    ///
    /// # Process
    ///
    /// For each root in scan order:
    /// 1. Roots without components are skipped silently
    /// 2. An existing index file is passed to `policy`
    /// 3. The index content is rendered and written in one step
    ///
    /// A failed write is recorded and the next root is processed. The run
    /// stops early only when `policy` answers [`ConflictDecision::AbortAll`];
    /// roots processed before that keep their outcome.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use barrel_gen::{ConflictDecision, GenerationConfig, Pipeline};
    ///
    /// # fn main() -> barrel_gen::Result<()> {
    /// let pipeline = Pipeline::new(GenerationConfig::default())?;
    /// let scan = pipeline.scan(["./src/components"]);
    ///
    /// let outcome = pipeline.generate(&scan, ConflictDecision::Skip);
    /// println!("{} created, {} skipped", outcome.created.len(), outcome.skipped.len());
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn generate<P: ConflictPolicy>(&self, scan: &ScanResult, policy: P) -> GenerationOutcome {
        generate_indexes(scan, &self.config, policy)
    }
}

/// Per-root generation loop shared by [`Pipeline::generate`] and
/// [`crate::generate`].
#[instrument(skip_all, fields(roots = scan.len(), style = %config.export_style))]
pub(crate) fn generate_indexes<P: ConflictPolicy>(
    scan: &ScanResult,
    config: &GenerationConfig,
    mut policy: P,
) -> GenerationOutcome {
    let start = Instant::now();
    let index_filename = config.index_filename();
    let mut outcome = GenerationOutcome::default();

    for entry in scan {
        if entry.components.is_empty() {
            debug!("No components in {}, skipping", entry.root.display());
            continue;
        }

        let index_path = entry.root.join(&index_filename);

        if index_path.exists() {
            match policy.resolve(&index_path) {
                ConflictDecision::Overwrite => {
                    debug!("Overwriting {}", index_path.display());
                }
                ConflictDecision::Skip => {
                    debug!("Keeping existing {}", index_path.display());
                    outcome.skipped.push(index_path);
                    continue;
                }
                ConflictDecision::AbortAll => {
                    warn!("Generation aborted at {}", index_path.display());
                    outcome.aborted = true;
                    break;
                }
            }
        }

        let content = render_index(&entry.components, config.export_style, config.module_extension);

        match write_file_atomic(&index_path, &content) {
            Ok(()) => outcome.created.push(index_path),
            Err(e) => {
                warn!("Failed to write {}: {}", index_path.display(), e);
                outcome.failed.push(FailedWrite {
                    path: index_path,
                    message: e.to_string(),
                });
            }
        }
    }

    info!(
        "Generation finished in {:.2}s: {} created, {} skipped, {} failed",
        start.elapsed().as_secs_f64(),
        outcome.created.len(),
        outcome.skipped.len(),
        outcome.failed.len()
    );

    outcome
}
