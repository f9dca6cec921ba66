//! # barrel-gen
//!
//! Scans component folders and writes a barrel (`index.ts` / `index.js`)
//! file per folder that re-exports every component found in it.
//!
//! ## Features
//!
//! - Recursive scan that skips hidden folders and `node_modules`
//! - Export-style detection (`default`, `named`, `unknown`) per file
//! - Named (`export { X } from`) or wildcard (`export * from`) output
//! - Multi-folder runs with per-folder conflict decisions and
//!   failure isolation
//!
//! ## Quick Start
//!
//! ```no_run
//! use barrel_gen::{ConflictDecision, ExportStyle, GenerationConfig};
//!
//! # fn main() -> barrel_gen::Result<()> {
//! let config = GenerationConfig::builder()
//!     .export_style(ExportStyle::Named)
//!     .build()?;
//!
//! let scan = barrel_gen::scan(["./src/components"], &config.file_extensions);
//! println!("{}", barrel_gen::preview(&scan, config.export_style, config.module_extension));
//!
//! let outcome = barrel_gen::generate(&scan, &config, ConflictDecision::Skip);
//! println!("{}", barrel_gen::render_report(&outcome)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! 1. **Scanner**: walks each root and builds component descriptors
//! 2. **Renderer**: turns descriptors into export statements
//! 3. **Pipeline**: writes one index file per root and aggregates the outcome

#![warn(
    missing_docs,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(clippy::module_name_repetitions)]

mod classify;
mod component;
mod config;
mod error;
mod filter;
mod name;
mod pipeline;
mod render;
mod report;
mod scanner;
mod writer;

pub mod settings;

pub use classify::{classify_export, ExportKind};
pub use component::ComponentDescriptor;
pub use config::{
    default_file_extensions, ExportStyle, GenerationConfig, GenerationConfigBuilder,
    ModuleExtension, DEFAULT_FILE_EXTENSIONS,
};
pub use error::{Error, Result};
pub use filter::EXCLUDED_DIRECTORY;
pub use name::derive_component_name;
pub use pipeline::{ConflictDecision, ConflictPolicy, FailedWrite, GenerationOutcome, Pipeline};
pub use render::{render_index, render_preview};
pub use report::{render_report, ReportRenderer};
pub use scanner::{RootScan, ScanResult, Scanner};
pub use settings::Settings;

use std::path::Path;

/// Scans each root for files ending in one of `file_extensions`.
///
/// Only the built-in directory rules apply; use [`Scanner::new`] for
/// extra exclusion patterns. Missing roots map to an empty list.
pub fn scan<I, P>(roots: I, file_extensions: &[String]) -> ScanResult
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    Scanner::with_extensions(file_extensions.iter().cloned()).scan(roots)
}

/// Renders the combined index preview for every non-empty root.
#[must_use]
pub fn preview(scan: &ScanResult, style: ExportStyle, module_extension: ModuleExtension) -> String {
    render_preview(scan, style, module_extension)
}

/// Writes the index files for a scan result.
///
/// Never fails as a whole: per-root problems end up in the returned
/// [`GenerationOutcome`].
pub fn generate<P: ConflictPolicy>(
    scan: &ScanResult,
    config: &GenerationConfig,
    policy: P,
) -> GenerationOutcome {
    pipeline::generate_indexes(scan, config, policy)
}
