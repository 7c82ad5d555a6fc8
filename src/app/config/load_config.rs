//! Brand configuration loading.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::domain::config::parse_config_content;
use crate::domain::{AppError, BrandConfig, CONFIG_FILE};

/// Where the configuration for a run came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    SourceDir(PathBuf),
    Defaults,
}

/// Resolve the configuration: an explicit path wins, then
/// `<source_dir>/brandkit.toml`, then the built-in defaults.
pub fn load_config(
    source_dir: &Path,
    explicit: Option<&Path>,
) -> Result<(BrandConfig, ConfigSource), AppError> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(AppError::config_error(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let config = read_config(path)?;
        return Ok((config, ConfigSource::Explicit(path.to_path_buf())));
    }

    let candidate = source_dir.join(CONFIG_FILE);
    if candidate.is_file() {
        let config = read_config(&candidate)?;
        return Ok((config, ConfigSource::SourceDir(candidate)));
    }

    debug!(path = %candidate.display(), "no brand config found, using defaults");
    Ok((BrandConfig::default(), ConfigSource::Defaults))
}

fn read_config(path: &Path) -> Result<BrandConfig, AppError> {
    info!(path = %path.display(), "loading brand config");
    let content = fs::read_to_string(path)?;
    parse_config_content(&content).map_err(|err| match err {
        AppError::Io(_) => err,
        other => AppError::config_error(format!("{}: {}", path.display(), other)),
    })
}
