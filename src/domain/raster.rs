use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One rasterized edge size and the file holding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterArtifact {
    pub size: u32,
    pub path: PathBuf,
}

/// Size-indexed set of rasters produced in one run. May be incomplete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RasterMatrix {
    artifacts: BTreeMap<u32, PathBuf>,
}

impl RasterMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, artifact: RasterArtifact) {
        self.artifacts.insert(artifact.size, artifact.path);
    }

    pub fn contains(&self, size: u32) -> bool {
        self.artifacts.contains_key(&size)
    }

    pub fn get(&self, size: u32) -> Option<&Path> {
        self.artifacts.get(&size).map(PathBuf::as_path)
    }

    /// Sizes present, ascending.
    pub fn sizes(&self) -> impl Iterator<Item = u32> + '_ {
        self.artifacts.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Artifacts for the requested sizes that are present, in request order.
    pub fn select(&self, sizes: &[u32]) -> Vec<RasterArtifact> {
        sizes
            .iter()
            .filter_map(|&size| {
                self.get(size).map(|path| RasterArtifact { size, path: path.to_path_buf() })
            })
            .collect()
    }
}
