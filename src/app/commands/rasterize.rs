//! Raster matrix generation.

use std::collections::BTreeSet;
use std::path::Path;

use rayon::prelude::*;
use tracing::{error, info};

use crate::domain::{RasterArtifact, RasterMatrix, ScratchLayout, Stage, StageReport, ToolError};
use crate::ports::AssetToolchain;

/// Rasterize `vector` once per requested size into `matrix`.
///
/// Sizes already present in `matrix` are not rasterized again. Sizes are
/// independent and run in parallel; a failed size is logged, recorded, and
/// left out of the matrix without affecting the others.
pub fn execute<T: AssetToolchain>(
    toolchain: &T,
    vector: Option<&Path>,
    sizes: &BTreeSet<u32>,
    scratch: &ScratchLayout,
    matrix: &mut RasterMatrix,
) -> StageReport {
    let mut report = StageReport::new(Stage::Rasterize);

    let Some(vector) = vector else {
        error!("no vector logo available, skipping rasterization");
        report.fatal("vector logo was not synthesized");
        return report;
    };

    let pending: Vec<u32> = sizes.iter().copied().filter(|size| !matrix.contains(*size)).collect();
    for size in sizes.iter().filter(|size| matrix.contains(**size)) {
        report.skipped(format!("{size}x{size} (already generated)"));
    }

    let results: Vec<(u32, Result<RasterArtifact, ToolError>)> = pending
        .par_iter()
        .map(|&size| {
            let path = scratch.raster(size);
            let result = toolchain
                .rasterize(vector, size, &path)
                .map(|()| RasterArtifact { size, path });
            (size, result)
        })
        .collect();

    for (size, result) in results {
        match result {
            Ok(artifact) => {
                info!(size, "generated {size}x{size} PNG");
                report.produced(format!("{size}x{size}"));
                matrix.insert(artifact);
            }
            Err(err) => {
                error!(size, error = %err, "failed to generate {size}x{size} PNG");
                report.failed(format!("{size}x{size}"), err);
            }
        }
    }

    report
}
