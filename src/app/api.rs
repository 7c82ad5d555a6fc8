//! API Facade for the application.
//!
//! Glues together configuration loading, context creation and command execution.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::adapters::CommandToolchain;
use crate::app::AppContext;
use crate::app::commands::generate;
use crate::app::config::{ConfigSource, load_config};
use crate::domain::{BrandConfig, ToolError, ToolKind};

pub use crate::app::commands::generate::GenerateOptions;
pub use crate::domain::{AppError, RunHealth, RunReport};

/// Result of probing one external tool.
#[derive(Debug)]
pub struct ToolStatus {
    pub tool: ToolKind,
    pub program: String,
    pub result: Result<(), ToolError>,
}

fn require_dir(path: &Path) -> Result<(), AppError> {
    if path.is_dir() { Ok(()) } else { Err(AppError::DirectoryNotFound(path.to_path_buf())) }
}

fn resolve_config(source_dir: &Path, config_path: Option<&Path>) -> Result<BrandConfig, AppError> {
    let (config, source) = load_config(source_dir, config_path)?;
    match source {
        ConfigSource::Explicit(path) | ConfigSource::SourceDir(path) => {
            info!(path = %path.display(), product = %config.brand.name, "using brand config");
        }
        ConfigSource::Defaults => info!(product = %config.brand.name, "using built-in brand config"),
    }
    Ok(config)
}

/// Create an `AppContext` backed by the configured external tools.
fn create_context(
    config: BrandConfig,
    builder_dir: PathBuf,
    source_dir: PathBuf,
) -> AppContext<CommandToolchain> {
    let toolchain = CommandToolchain::new(&config.tools);
    AppContext::new(config, toolchain, builder_dir, source_dir)
}

/// Generate every brand asset and deploy it into the builder's variants.
pub fn generate(
    builder_dir: &Path,
    source_dir: &Path,
    config_path: Option<&Path>,
    options: GenerateOptions,
) -> Result<RunReport, AppError> {
    require_dir(builder_dir)?;
    require_dir(source_dir)?;
    let config = resolve_config(source_dir, config_path)?;
    let ctx = create_context(config, builder_dir.to_path_buf(), source_dir.to_path_buf());
    generate::execute(&ctx, &options)
}

/// Probe the configured external tools without generating anything.
pub fn check_tools(source_dir: &Path, config_path: Option<&Path>) -> Result<Vec<ToolStatus>, AppError> {
    require_dir(source_dir)?;
    let config = resolve_config(source_dir, config_path)?;
    let toolchain = CommandToolchain::new(&config.tools);
    Ok(generate::check_tools(&toolchain)
        .into_iter()
        .map(|(tool, result)| ToolStatus { tool, program: config.tools.spec(tool).program, result })
        .collect())
}
