//! Variants and the static routing table from generated artifacts to their
//! per-variant destinations.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use super::container::ContainerKind;
use super::raster::RasterMatrix;

/// Suffix appended to a destination that is about to be overwritten.
pub const BACKUP_SUFFIX: &str = ".backup";

/// `<path>.backup`, keeping the original extension in place.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// A build variant and the root of its resource tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantTarget {
    pub name: String,
    pub root: PathBuf,
}

impl VariantTarget {
    /// Variant rooted at `<builder>/src/<name>`.
    pub fn under(builder_dir: &Path, name: &str) -> Self {
        Self { name: name.to_string(), root: builder_dir.join("src").join(name) }
    }

    /// Absolute destination for a path relative to the variant root.
    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }
}

/// Kinds of artifacts the pipeline can deploy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Container(ContainerKind),
    Raster(u32),
    Vector,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Container(kind) => write!(f, "{kind}"),
            ArtifactKind::Raster(size) => write!(f, "{size}x{size} PNG"),
            ArtifactKind::Vector => f.write_str("SVG logo"),
        }
    }
}

/// One routing rule: artifact kind → path relative to the variant root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeploymentEntry {
    pub artifact: ArtifactKind,
    pub destination: &'static str,
}

/// Fixed routing table shared by every variant.
#[derive(Debug, Clone)]
pub struct DeploymentMapping {
    entries: Vec<DeploymentEntry>,
}

impl DeploymentMapping {
    /// The standard Windows / macOS / server / Linux resource layout.
    pub fn standard() -> Self {
        let entry = |artifact, destination| DeploymentEntry { artifact, destination };
        Self {
            entries: vec![
                entry(ArtifactKind::Container(ContainerKind::Ico), "resources/win32/code.ico"),
                entry(ArtifactKind::Container(ContainerKind::Icns), "resources/darwin/code.icns"),
                entry(ArtifactKind::Raster(150), "resources/win32/code_150x150.png"),
                entry(ArtifactKind::Raster(70), "resources/win32/code_70x70.png"),
                entry(ArtifactKind::Raster(192), "resources/server/code-192.png"),
                entry(ArtifactKind::Raster(512), "resources/server/code-512.png"),
                entry(ArtifactKind::Vector, "resources/linux/code.svg"),
            ],
        }
    }

    pub fn entries(&self) -> &[DeploymentEntry] {
        &self.entries
    }
}

/// Everything the generation stages produced, as handed to the deployer.
#[derive(Debug, Clone, Default)]
pub struct GeneratedArtifacts {
    pub vector: Option<PathBuf>,
    pub rasters: RasterMatrix,
    pub containers: BTreeMap<ContainerKind, PathBuf>,
}

impl GeneratedArtifacts {
    /// Source file for an artifact kind, if that artifact was produced.
    pub fn source_for(&self, artifact: ArtifactKind) -> Option<&Path> {
        match artifact {
            ArtifactKind::Container(kind) => self.containers.get(&kind).map(PathBuf::as_path),
            ArtifactKind::Raster(size) => self.rasters.get(size),
            ArtifactKind::Vector => self.vector.as_deref(),
        }
    }
}
