//! Basic example of using barrel-gen as a library
//!
//! Scans a component folder, prints the index that would be written, then
//! writes it, keeping any index file that already exists.
//!
//! ```text
//! cargo run --example basic -- ./src/components
//! ```

use barrel_gen::{ConflictDecision, ExportStyle, GenerationConfig, Pipeline};

fn main() -> anyhow::Result<()> {
    let root = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "./src/components".to_string());

    let config = GenerationConfig::builder()
        .export_style(ExportStyle::Named)
        .use_typescript(true)
        .build()?;
    let pipeline = Pipeline::new(config)?;

    let scan = pipeline.scan([&root]);
    println!("Found {} components under {root}\n", scan.total_components());
    println!("{}\n", pipeline.preview(&scan));

    let outcome = pipeline.generate(&scan, ConflictDecision::Skip);
    println!("{}", barrel_gen::render_report(&outcome)?);

    Ok(())
}
