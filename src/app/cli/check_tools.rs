//! Tool probe command implementation.

use std::path::Path;

use serde_json::json;

use crate::app::api;
use crate::domain::AppError;

pub fn run_check_tools(source_dir: &Path, config: Option<&Path>, json: bool) -> Result<i32, AppError> {
    let statuses = api::check_tools(source_dir, config)?;
    let blocked = statuses.iter().any(|status| {
        status.tool.is_required() && status.result.as_ref().is_err_and(|err| err.is_unavailable())
    });

    if json {
        let entries: Vec<_> = statuses
            .iter()
            .map(|status| {
                json!({
                    "tool": status.tool,
                    "program": status.program,
                    "available": status.result.as_ref().map_or_else(|err| !err.is_unavailable(), |_| true),
                    "required": status.tool.is_required(),
                    "error": status.result.as_ref().err().map(ToString::to_string),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for status in &statuses {
            match &status.result {
                Ok(()) => println!("✅ {}: {}", status.tool, status.program),
                Err(err) if err.is_unavailable() && status.tool.is_required() => {
                    println!("❌ {}: {}", status.tool, err)
                }
                Err(err) if err.is_unavailable() => {
                    println!("⚠️  {}: {} (optional, its container will be skipped)", status.tool, err)
                }
                Err(err) => println!("⚠️  {}: {}", status.tool, err),
            }
        }
    }

    Ok(if blocked { 1 } else { 0 })
}
