//! Scratch artifact removal.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::domain::{ScratchLayout, Stage, StageReport};

/// Removes scratch artifacts when dropped, so cleanup also happens on early
/// returns and panics. Call [`ScratchGuard::finish`] on the normal path to
/// get the stage report.
pub struct ScratchGuard {
    scratch: ScratchLayout,
    retain: bool,
    armed: bool,
}

impl ScratchGuard {
    pub fn new(scratch: ScratchLayout) -> Self {
        Self { scratch, retain: false, armed: true }
    }

    /// Keep scratch artifacts on disk for inspection.
    pub fn retain(&mut self) {
        self.retain = true;
    }

    pub fn is_retained(&self) -> bool {
        self.retain
    }

    /// Run cleanup now (unless retained) and disarm the guard.
    pub fn finish(mut self) -> StageReport {
        self.armed = false;
        if self.retain {
            info!(dir = %self.scratch.dir().display(), "keeping intermediate files");
            let mut report = StageReport::new(Stage::Cleanup);
            report.skipped("intermediate files retained");
            return report;
        }
        remove_scratch(&self.scratch)
    }
}

impl Drop for ScratchGuard {
    fn drop(&mut self) {
        if self.armed && !self.retain {
            debug!("cleaning up intermediate files after an interrupted run");
            remove_scratch(&self.scratch);
        }
    }
}

/// Delete every scratch artifact in the builder directory, including
/// leftovers from earlier runs.
pub fn remove_scratch(scratch: &ScratchLayout) -> StageReport {
    let mut report = StageReport::new(Stage::Cleanup);

    let entries = match fs::read_dir(scratch.dir()) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(dir = %scratch.dir().display(), error = %err, "failed to scan for intermediate files");
            report.failed(scratch.dir().display().to_string(), err);
            return report;
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .filter(|name| scratch.is_scratch_name(name))
        .collect();
    names.sort();

    for name in names {
        let path = scratch.dir().join(&name);
        match remove_path(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "removed intermediate file");
                report.produced(name);
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to remove intermediate file");
                report.failed(name, err);
            }
        }
    }

    info!(removed = report.produced.len(), "cleaned up intermediate files");
    report
}

fn remove_path(path: &Path) -> io::Result<()> {
    if path.is_dir() { fs::remove_dir_all(path) } else { fs::remove_file(path) }
}
