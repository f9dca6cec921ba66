use crate::{
    error::{Error, Result},
    pipeline::GenerationOutcome,
};
use serde::Serialize;
use tera::{Context, Tera};

const REPORT_TEMPLATE: &str = "report";

#[derive(Serialize)]
struct ReportContext {
    empty: bool,
    aborted: bool,
    created: Vec<String>,
    skipped: Vec<String>,
    failed: Vec<FailureView>,
}

#[derive(Serialize)]
struct FailureView {
    path: String,
    message: String,
}

impl ReportContext {
    fn from_outcome(outcome: &GenerationOutcome) -> Self {
        Self {
            empty: outcome.is_empty(),
            aborted: outcome.aborted,
            created: outcome
                .created
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            skipped: outcome
                .skipped
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            failed: outcome
                .failed
                .iter()
                .map(|f| FailureView {
                    path: f.path.display().to_string(),
                    message: f.message.clone(),
                })
                .collect(),
        }
    }
}

/// Renders human-readable summaries of generation runs.
pub struct ReportRenderer {
    tera: Tera,
}

impl ReportRenderer {
    /// Creates a renderer with the built-in report template.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to parse.
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(REPORT_TEMPLATE, include_str!("../templates/report.tera"))
            .map_err(|e| Error::template(REPORT_TEMPLATE, &e))?;

        Ok(Self { tera })
    }

    /// Renders the summary of `outcome`.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render(&self, outcome: &GenerationOutcome) -> Result<String> {
        let context = Context::from_serialize(ReportContext::from_outcome(outcome))
            .map_err(|e| Error::template(REPORT_TEMPLATE, &e))?;

        self.tera
            .render(REPORT_TEMPLATE, &context)
            .map(|text| text.trim_end().to_string())
            .map_err(|e| Error::template(REPORT_TEMPLATE, &e))
    }
}

impl std::fmt::Debug for ReportRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportRenderer").finish_non_exhaustive()
    }
}

/// Renders a generation summary with the built-in template.
///
/// # Errors
///
/// Returns an error if the template cannot be parsed or rendered.
pub fn render_report(outcome: &GenerationOutcome) -> Result<String> {
    ReportRenderer::new()?.render(outcome)
}
