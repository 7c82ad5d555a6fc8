//! Structured per-stage results and the aggregated run report.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use super::asset_spec::AssetClass;
use super::palette::BrandPalette;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Synthesize,
    Rasterize,
    Pack,
    Deploy,
    Patch,
    Cleanup,
    Summary,
}

impl Stage {
    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::Synthesize => "Vector logo",
            Stage::Rasterize => "Raster matrix",
            Stage::Pack => "Icon containers",
            Stage::Deploy => "Deployment",
            Stage::Patch => "Descriptor patches",
            Stage::Cleanup => "Scratch cleanup",
            Stage::Summary => "Summary report",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// An item a stage could not produce, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedItem {
    pub item: String,
    pub reason: String,
}

/// Result of one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    Success,
    Partial(Vec<FailedItem>),
    Fatal(String),
}

impl StageOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, StageOutcome::Success)
    }
}

/// Everything one stage did, for one scope (the whole run or a single variant).
#[derive(Debug, Clone, Serialize)]
pub struct StageReport {
    pub stage: Stage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    pub produced: Vec<String>,
    pub skipped: Vec<String>,
    pub failures: Vec<FailedItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fatal: Option<String>,
}

impl StageReport {
    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            variant: None,
            produced: Vec::new(),
            skipped: Vec::new(),
            failures: Vec::new(),
            fatal: None,
        }
    }

    pub fn for_variant(stage: Stage, variant: &str) -> Self {
        Self { variant: Some(variant.to_string()), ..Self::new(stage) }
    }

    pub fn produced(&mut self, item: impl Into<String>) {
        self.produced.push(item.into());
    }

    pub fn skipped(&mut self, item: impl Into<String>) {
        self.skipped.push(item.into());
    }

    pub fn failed(&mut self, item: impl Into<String>, reason: impl ToString) {
        self.failures.push(FailedItem { item: item.into(), reason: reason.to_string() });
    }

    pub fn fatal(&mut self, reason: impl ToString) {
        self.fatal = Some(reason.to_string());
    }

    pub fn outcome(&self) -> StageOutcome {
        if let Some(reason) = &self.fatal {
            StageOutcome::Fatal(reason.clone())
        } else if self.failures.is_empty() {
            StageOutcome::Success
        } else {
            StageOutcome::Partial(self.failures.clone())
        }
    }

    /// `Deployment (stable)`-style label.
    pub fn label(&self) -> String {
        match &self.variant {
            Some(variant) => format!("{} ({})", self.stage, variant),
            None => self.stage.to_string(),
        }
    }
}

/// Overall run health derived from every stage outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunHealth {
    /// Every stage succeeded.
    Healthy,
    /// Some items failed; everything else was produced.
    Degraded,
    /// At least one stage could not run at all.
    Failed,
}

impl fmt::Display for RunHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunHealth::Healthy => f.write_str("healthy"),
            RunHealth::Degraded => f.write_str("degraded"),
            RunHealth::Failed => f.write_str("failed"),
        }
    }
}

/// What was produced for one asset class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedClass {
    pub class: AssetClass,
    pub items: Vec<String>,
}

/// Aggregated result of a full pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub product: String,
    pub palette: BrandPalette,
    pub assets: Vec<GeneratedClass>,
    pub raster_sizes: Vec<u32>,
    pub variants: Vec<String>,
    pub stages: Vec<StageReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_path: Option<PathBuf>,
    pub scratch_retained: bool,
}

impl RunReport {
    pub fn health(&self) -> RunHealth {
        let outcomes: Vec<_> = self.stages.iter().map(StageReport::outcome).collect();
        if outcomes.iter().any(|o| matches!(o, StageOutcome::Fatal(_))) {
            RunHealth::Failed
        } else if outcomes.iter().all(StageOutcome::is_success) {
            RunHealth::Healthy
        } else {
            RunHealth::Degraded
        }
    }

    /// Failures across all stages, labelled by stage.
    pub fn failures(&self) -> Vec<(String, FailedItem)> {
        self.stages
            .iter()
            .flat_map(|report| {
                let label = report.label();
                report.failures.iter().cloned().map(move |item| (label.clone(), item))
            })
            .collect()
    }

    pub fn stage_reports(&self, stage: Stage) -> impl Iterator<Item = &StageReport> {
        self.stages.iter().filter(move |report| report.stage == stage)
    }
}
