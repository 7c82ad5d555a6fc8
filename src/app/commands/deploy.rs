//! Per-variant artifact deployment.

use tracing::{error, info, warn};

use super::protected_write::{WriteAction, copy_with_backup};
use crate::domain::{DeploymentMapping, GeneratedArtifacts, Stage, StageReport, VariantTarget};

/// Copy every mapped artifact into `variant`'s resource tree.
///
/// Failures are per file: a failed copy is recorded and the remaining
/// entries still deploy. Artifacts an earlier stage did not produce are
/// skipped with a warning.
pub fn execute(
    artifacts: &GeneratedArtifacts,
    mapping: &DeploymentMapping,
    variant: &VariantTarget,
) -> StageReport {
    let mut report = StageReport::for_variant(Stage::Deploy, &variant.name);

    for entry in mapping.entries() {
        let destination = variant.resolve(entry.destination);
        let Some(source) = artifacts.source_for(entry.artifact) else {
            warn!(
                variant = %variant.name,
                artifact = %entry.artifact,
                "skipping {}, artifact was not generated",
                entry.destination
            );
            report.skipped(entry.destination);
            continue;
        };

        match copy_with_backup(source, &destination) {
            Ok(action) => {
                if let WriteAction::Replaced { backup } = &action {
                    info!(
                        variant = %variant.name,
                        backup = %backup.display(),
                        "backed up existing file"
                    );
                }
                info!(
                    variant = %variant.name,
                    path = %destination.display(),
                    "deployed {} {}",
                    variant.name,
                    entry.artifact
                );
                report.produced(entry.destination);
            }
            Err(err) => {
                error!(
                    variant = %variant.name,
                    path = %destination.display(),
                    error = %err,
                    "failed to deploy {}",
                    entry.artifact
                );
                report.failed(entry.destination, err);
            }
        }
    }

    report
}
