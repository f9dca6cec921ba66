use anyhow::Context;
use barrel_gen::{
    render_report, settings::DEFAULT_SETTINGS_FILE, ConflictDecision, ExportStyle,
    GenerationConfig, GenerationOutcome, Pipeline, ScanResult, Settings,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "barrel-gen",
    version,
    about = "Generate barrel index files for component folders",
    long_about = "Scan component folders and write an index.ts / index.js file in each one \
    that re-exports every component found below it.\n\n\
    Hidden folders and node_modules are never scanned. Preferences are remembered \
    in a JSON settings file between runs.\n\n\
    USAGE EXAMPLES:\n  \
      # List the components that would be exported\n  \
      barrel-gen scan ./src/components\n\n  \
      # Show the generated index content for two folders\n  \
      barrel-gen --style reexport preview ./src/atoms ./src/molecules\n\n  \
      # Write index.js files, skipping folders that already have one\n  \
      barrel-gen --js generate ./src/components --on-conflict skip"
)]
struct Cli {
    /// Component file suffix (repeatable, replaces the saved list)
    #[arg(long = "ext", value_name = "EXT", global = true)]
    extensions: Vec<String>,

    /// Export statement style
    #[arg(long, value_enum, global = true)]
    style: Option<CliStyle>,

    /// Write index.js instead of index.ts
    #[arg(long, global = true, conflicts_with = "ts")]
    js: bool,

    /// Write index.ts (overrides a saved JavaScript preference)
    #[arg(long, global = true)]
    ts: bool,

    /// Glob for extra directories to skip (repeatable)
    #[arg(long, value_name = "GLOB", global = true)]
    exclude: Vec<String>,

    /// Settings file with remembered preferences
    #[arg(
        long,
        env = "BARREL_GEN_SETTINGS",
        default_value = DEFAULT_SETTINGS_FILE,
        value_name = "FILE",
        global = true
    )]
    settings: PathBuf,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List discovered components per folder
    Scan {
        /// Folders to scan
        #[arg(required = true, value_name = "ROOT")]
        roots: Vec<PathBuf>,

        /// Print the scan result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the index content that would be generated
    Preview {
        /// Folders to scan
        #[arg(required = true, value_name = "ROOT")]
        roots: Vec<PathBuf>,
    },

    /// Write an index file into every folder that has components
    Generate {
        /// Folders to scan
        #[arg(required = true, value_name = "ROOT")]
        roots: Vec<PathBuf>,

        /// What to do when an index file already exists
        #[arg(long, value_enum, default_value = "ask")]
        on_conflict: CliConflict,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,

        /// Do not update the settings file
        #[arg(long)]
        no_save: bool,
    },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliStyle {
    /// export { Component } from './component'
    Named,
    /// export * from './component'
    Reexport,
}

impl From<CliStyle> for ExportStyle {
    fn from(s: CliStyle) -> Self {
        match s {
            CliStyle::Named => Self::Named,
            CliStyle::Reexport => Self::Reexport,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum CliConflict {
    /// Prompt for each existing index file
    Ask,
    /// Replace existing index files
    Overwrite,
    /// Keep existing index files
    Skip,
    /// Stop at the first existing index file
    Abort,
}

#[derive(Serialize)]
struct GenerateSummary<'a> {
    generated_at: String,
    #[serde(flatten)]
    outcome: &'a GenerationOutcome,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose)?;

    let mut settings = Settings::load(&cli.settings);
    apply_overrides(&cli, &mut settings);

    let config = GenerationConfig::builder()
        .module_extension(settings.module_extension())
        .export_style(settings.export_style)
        .file_extensions(settings.file_extensions.iter().cloned())
        .exclude_directories(cli.exclude.iter().cloned())
        .build()
        .context("Failed to build configuration")?;

    let pipeline = Pipeline::new(config).context("Failed to create pipeline")?;

    match &cli.command {
        Command::Scan { roots, json } => {
            let scan = pipeline.scan(roots);
            if *json {
                println!("{}", serde_json::to_string_pretty(&scan)?);
            } else {
                print_scan(&scan);
            }
        }
        Command::Preview { roots } => {
            let scan = pipeline.scan(roots);
            println!("{}", pipeline.preview(&scan));
        }
        Command::Generate {
            roots,
            on_conflict,
            json,
            no_save,
        } => {
            let scan = pipeline.scan(roots);
            let outcome = match on_conflict {
                CliConflict::Ask => pipeline.generate(&scan, ask_user),
                CliConflict::Overwrite => pipeline.generate(&scan, ConflictDecision::Overwrite),
                CliConflict::Skip => pipeline.generate(&scan, ConflictDecision::Skip),
                CliConflict::Abort => pipeline.generate(&scan, ConflictDecision::AbortAll),
            };

            if *json {
                let summary = GenerateSummary {
                    generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
                    outcome: &outcome,
                };
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{}", render_report(&outcome).context("Failed to render report")?);
            }

            if !*no_save && !outcome.is_empty() {
                settings.last_directory = roots.last().cloned();
                if let Err(e) = settings.save(&cli.settings) {
                    tracing::warn!("Could not save settings: {}", e);
                }
            }

            if outcome.has_failures() {
                anyhow::bail!("{} index file(s) could not be written", outcome.failed.len());
            }
        }
    }

    Ok(())
}

/// Command-line options win over the saved preferences.
fn apply_overrides(cli: &Cli, settings: &mut Settings) {
    if !cli.extensions.is_empty() {
        settings.file_extensions.clone_from(&cli.extensions);
    }
    if let Some(style) = cli.style {
        settings.export_style = style.into();
    }
    if cli.js {
        settings.use_typescript = false;
    } else if cli.ts {
        settings.use_typescript = true;
    }
}

fn print_scan(scan: &ScanResult) {
    for entry in scan {
        println!("{} ({} components)", entry.root.display(), entry.components.len());

        if entry.components.is_empty() {
            println!("  (no component files)");
        }
        for component in &entry.components {
            println!("  {:<48} {}", component.relative_path, component.export_kind);
        }
    }

    println!(
        "\nFound {} component files in {} folders.",
        scan.total_components(),
        scan.len()
    );
}

fn ask_user(index_path: &Path) -> ConflictDecision {
    const OVERWRITE: &str = "Overwrite";
    const SKIP: &str = "Skip";
    const ABORT: &str = "Abort all";

    let prompt = format!("{} already exists.", index_path.display());
    match inquire::Select::new(&prompt, vec![OVERWRITE, SKIP, ABORT]).prompt() {
        Ok(OVERWRITE) => ConflictDecision::Overwrite,
        Ok(SKIP) => ConflictDecision::Skip,
        Ok(_) => ConflictDecision::AbortAll,
        Err(e) => {
            tracing::warn!("No answer for {} ({}), aborting", index_path.display(), e);
            ConflictDecision::AbortAll
        }
    }
}

fn setup_tracing(verbosity: u8) -> anyhow::Result<()> {
    let filter = match verbosity {
        0 => EnvFilter::new("barrel_gen=info"),
        1 => EnvFilter::new("barrel_gen=debug"),
        _ => EnvFilter::new("barrel_gen=trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}
