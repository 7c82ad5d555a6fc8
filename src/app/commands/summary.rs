//! Run summary report.

use std::fs;
use std::path::Path;

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::domain::{AppError, RunReport, Stage, StageOutcome};
use crate::services::templates::{self, SUMMARY_TEMPLATE};

#[derive(Serialize)]
struct PaletteLine<'a> {
    role: &'static str,
    color: &'a str,
}

#[derive(Serialize)]
struct ClassLine<'a> {
    name: &'static str,
    items: &'a [String],
}

#[derive(Serialize)]
struct VariantLine<'a> {
    name: &'a str,
    deployed: usize,
    patched: usize,
}

#[derive(Serialize)]
struct StageLine {
    label: String,
    status: String,
}

#[derive(Serialize)]
struct FailureLine {
    stage: String,
    item: String,
    reason: String,
}

#[derive(Serialize)]
struct SummaryContext<'a> {
    product: &'a str,
    generated_at: String,
    health: String,
    palette: Vec<PaletteLine<'a>>,
    asset_classes: Vec<ClassLine<'a>>,
    variants: Vec<VariantLine<'a>>,
    stages: Vec<StageLine>,
    failures: Vec<FailureLine>,
    scratch_retained: bool,
}

fn stage_status(outcome: &StageOutcome) -> String {
    match outcome {
        StageOutcome::Success => "success".to_string(),
        StageOutcome::Partial(failures) => format!("partial ({} failed)", failures.len()),
        StageOutcome::Fatal(reason) => format!("failed: {reason}"),
    }
}

fn produced_for(report: &RunReport, stage: Stage, variant: &str) -> usize {
    report
        .stage_reports(stage)
        .filter(|stage_report| stage_report.variant.as_deref() == Some(variant))
        .map(|stage_report| stage_report.produced.len())
        .sum()
}

/// Render the summary document for `report`.
pub fn render_summary(report: &RunReport, generated_at: &str) -> Result<String, AppError> {
    let context = SummaryContext {
        product: &report.product,
        generated_at: generated_at.to_string(),
        health: report.health().to_string(),
        palette: report
            .palette
            .entries()
            .map(|(role, color)| PaletteLine { role: role.display_name(), color })
            .collect(),
        asset_classes: report
            .assets
            .iter()
            .map(|class| ClassLine { name: class.class.display_name(), items: &class.items })
            .collect(),
        variants: report
            .variants
            .iter()
            .map(|name| VariantLine {
                name,
                deployed: produced_for(report, Stage::Deploy, name),
                patched: produced_for(report, Stage::Patch, name),
            })
            .collect(),
        stages: report
            .stages
            .iter()
            .map(|stage| StageLine { label: stage.label(), status: stage_status(&stage.outcome()) })
            .collect(),
        failures: report
            .failures()
            .into_iter()
            .map(|(stage, failed)| FailureLine { stage, item: failed.item, reason: failed.reason })
            .collect(),
        scratch_retained: report.scratch_retained,
    };

    templates::render(SUMMARY_TEMPLATE, context)
}

/// Write the summary for `report` to `path`, stamped with the current UTC time.
pub fn execute(report: &RunReport, path: &Path) -> Result<(), AppError> {
    let generated_at = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
    let content = render_summary(report, &generated_at)?;
    fs::write(path, content)?;
    info!(path = %path.display(), "generated summary report");
    Ok(())
}
