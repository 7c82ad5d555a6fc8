//! Vector logo synthesis.

use std::fs;
use std::path::PathBuf;

use minijinja::context;
use tracing::{error, info};

use crate::domain::{AppError, BrandPalette, ScratchLayout, Stage, StageReport};
use crate::services::templates::{self, LOGO_TEMPLATE};

/// Render the brand logo as a self-contained SVG document `edge` pixels wide.
///
/// Pure: identical inputs always produce byte-identical output.
pub fn synthesize_logo(palette: &BrandPalette, edge: u32) -> Result<String, AppError> {
    if edge == 0 {
        return Err(AppError::InvalidDimension { what: "logo edge".to_string() });
    }
    templates::render(LOGO_TEMPLATE, context! { palette => palette, edge => edge })
}

/// Write the synthesized logo into scratch. Returns its path when written.
pub fn execute(
    palette: &BrandPalette,
    edge: u32,
    scratch: &ScratchLayout,
) -> (Option<PathBuf>, StageReport) {
    let mut report = StageReport::new(Stage::Synthesize);
    let path = scratch.vector();

    let written = synthesize_logo(palette, edge).and_then(|svg| {
        fs::write(&path, svg)?;
        Ok(())
    });

    match written {
        Ok(()) => {
            info!(path = %path.display(), edge, "synthesized vector logo");
            report.produced(path.display().to_string());
            (Some(path), report)
        }
        Err(err) => {
            error!(error = %err, "failed to synthesize vector logo");
            report.fatal(err);
            (None, report)
        }
    }
}
