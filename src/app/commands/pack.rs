//! Icon container packing.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::domain::{
    AppError, ContainerKind, ICNS_ENTRIES, ICO_SIZES, RasterMatrix, ScratchLayout, Stage,
    StageReport,
};
use crate::ports::AssetToolchain;

/// Pack every container kind from whatever rasters are available.
pub fn execute<T: AssetToolchain>(
    toolchain: &T,
    matrix: &RasterMatrix,
    scratch: &ScratchLayout,
) -> (BTreeMap<ContainerKind, PathBuf>, StageReport) {
    let mut report = StageReport::new(Stage::Pack);
    let mut containers = BTreeMap::new();

    for kind in ContainerKind::ALL {
        let output = scratch.container(kind);
        let result = match kind {
            ContainerKind::Ico => pack_ico(toolchain, matrix, &output),
            ContainerKind::Icns => pack_icns(toolchain, matrix, &scratch.iconset_dir(), &output),
        };
        match result {
            Ok(packed) => {
                info!(container = %kind, entries = packed, "generated {kind} file");
                report.produced(kind.to_string());
                containers.insert(kind, output);
            }
            Err(err) => {
                error!(container = %kind, error = %err, "failed to generate {kind} file");
                report.failed(kind.to_string(), err);
            }
        }
    }

    (containers, report)
}

/// Pack the ICO from the available subset of [`ICO_SIZES`], ascending.
/// Returns the number of entries packed.
pub fn pack_ico<T: AssetToolchain>(
    toolchain: &T,
    matrix: &RasterMatrix,
    output: &Path,
) -> Result<usize, AppError> {
    let inputs: Vec<PathBuf> =
        matrix.select(&ICO_SIZES).into_iter().map(|artifact| artifact.path).collect();
    if inputs.is_empty() {
        return Err(AppError::MissingInputs("ICO packing".to_string()));
    }
    if inputs.len() < ICO_SIZES.len() {
        debug!(available = inputs.len(), required = ICO_SIZES.len(), "packing partial ICO");
    }

    toolchain.pack_ico(&inputs, output)?;
    Ok(inputs.len())
}

/// Stage the available iconset entries and pack them into an ICNS.
/// The staging directory is removed afterwards. Returns the number of entries packed.
pub fn pack_icns<T: AssetToolchain>(
    toolchain: &T,
    matrix: &RasterMatrix,
    iconset_dir: &Path,
    output: &Path,
) -> Result<usize, AppError> {
    if iconset_dir.exists() {
        fs::remove_dir_all(iconset_dir)?;
    }
    fs::create_dir_all(iconset_dir)?;

    let staged = stage_iconset(matrix, iconset_dir).and_then(|count| {
        if count == 0 {
            return Err(AppError::MissingInputs("ICNS packing".to_string()));
        }
        toolchain.pack_icns(iconset_dir, output)?;
        Ok(count)
    });

    if let Err(err) = fs::remove_dir_all(iconset_dir) {
        warn!(
            path = %iconset_dir.display(),
            error = %err,
            "failed to remove iconset staging directory"
        );
    }
    staged
}

fn stage_iconset(matrix: &RasterMatrix, iconset_dir: &Path) -> Result<usize, AppError> {
    let mut count = 0;
    for entry in ICNS_ENTRIES {
        let Some(source) = matrix.get(entry.pixels) else {
            debug!(entry = %entry.file_name(), "skipping iconset entry, raster missing");
            continue;
        };
        fs::copy(source, iconset_dir.join(entry.file_name()))?;
        count += 1;
    }
    Ok(count)
}
