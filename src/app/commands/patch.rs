//! Descriptor rebranding.

use std::fs;
use std::path::Path;

use tracing::{debug, error, info};

use super::protected_write::write_with_backup;
use crate::domain::{
    AppError, BrandIdentity, DescriptorKind, Replacement, Stage, StageReport, VariantTarget,
    apply_replacements,
};

/// What patching one descriptor did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchAction {
    /// Content changed and was written back (original kept as `.backup`).
    Patched,
    /// Every rule was a no-op; the file was not touched.
    Unchanged,
    /// The descriptor does not exist in this variant.
    Missing,
}

/// Apply `rules` to the file at `path` in place.
pub fn patch_descriptor(path: &Path, rules: &[Replacement]) -> Result<PatchAction, AppError> {
    if !path.is_file() {
        return Ok(PatchAction::Missing);
    }
    let content = fs::read_to_string(path)?;
    let patched = apply_replacements(&content, rules);
    if patched == content {
        return Ok(PatchAction::Unchanged);
    }
    write_with_backup(path, &patched)?;
    Ok(PatchAction::Patched)
}

/// Patch both well-known descriptors of `variant`.
pub fn execute(variant: &VariantTarget, identity: &BrandIdentity) -> StageReport {
    let mut report = StageReport::for_variant(Stage::Patch, &variant.name);

    for kind in DescriptorKind::ALL {
        let path = variant.resolve(kind.relative_path());
        let rules = kind.replacements(identity);
        match patch_descriptor(&path, &rules) {
            Ok(PatchAction::Patched) => {
                info!(variant = %variant.name, path = %path.display(), "updated {} {kind}", variant.name);
                report.produced(kind.relative_path());
            }
            Ok(PatchAction::Unchanged) => {
                debug!(variant = %variant.name, path = %path.display(), "{kind} already branded");
                report.skipped(format!("{} (unchanged)", kind.relative_path()));
            }
            Ok(PatchAction::Missing) => {
                debug!(variant = %variant.name, path = %path.display(), "{kind} not present");
                report.skipped(format!("{} (not present)", kind.relative_path()));
            }
            Err(err) => {
                error!(variant = %variant.name, path = %path.display(), error = %err, "failed to update {kind}");
                report.failed(kind.relative_path(), err);
            }
        }
    }

    report
}
