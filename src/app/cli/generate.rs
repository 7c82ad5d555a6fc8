//! Generate command implementation.

use std::path::Path;

use crate::app::api::{self, GenerateOptions, RunHealth, RunReport};
use crate::domain::AppError;

pub struct GenerateArgs<'a> {
    pub builder_dir: &'a Path,
    pub source_dir: &'a Path,
    pub config: Option<&'a Path>,
    pub keep_scratch: bool,
    pub allow_partial: bool,
    pub json: bool,
}

pub fn run_generate(args: GenerateArgs<'_>) -> Result<i32, AppError> {
    let options = GenerateOptions { keep_scratch: args.keep_scratch };
    let report = api::generate(args.builder_dir, args.source_dir, args.config, options)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(exit_code(report.health(), args.allow_partial))
}

fn exit_code(health: RunHealth, allow_partial: bool) -> i32 {
    match health {
        RunHealth::Healthy => 0,
        RunHealth::Degraded if allow_partial => 0,
        RunHealth::Degraded | RunHealth::Failed => 1,
    }
}

fn print_report(report: &RunReport) {
    match report.health() {
        RunHealth::Healthy => println!("✅ Generated {} brand assets", report.product),
        RunHealth::Degraded => {
            println!("⚠️  Generated {} brand assets with failures:", report.product)
        }
        RunHealth::Failed => println!("❌ {} asset generation failed:", report.product),
    }

    for (stage, failure) in report.failures() {
        println!("  - {}: {} ({})", stage, failure.item, failure.reason);
    }
    for stage in &report.stages {
        if let Some(reason) = &stage.fatal {
            println!("  - {}: {}", stage.label(), reason);
        }
    }

    if !report.variants.is_empty() {
        println!("🎨 Variants updated: {}", report.variants.join(", "));
    }
    if report.scratch_retained {
        println!("🗂️  Intermediate files kept in the builder directory");
    }
    if let Some(path) = &report.summary_path {
        println!("📄 Summary: {}", path.display());
    }
}
