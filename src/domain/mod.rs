pub mod asset_spec;
pub mod config;
pub mod container;
pub mod deployment;
pub mod descriptor;
pub mod error;
pub mod outcome;
pub mod palette;
pub mod paths;
pub mod raster;
pub mod tool;

pub use asset_spec::{AssetClass, AssetFormat, AssetSpec, TargetSize};
pub use config::{BrandConfig, BrandIdentity, CONFIG_FILE, ToolSpec};
pub use container::{ContainerKind, ICNS_ENTRIES, ICO_SIZES, IcnsEntry};
pub use deployment::{
    ArtifactKind, BACKUP_SUFFIX, DeploymentEntry, DeploymentMapping, GeneratedArtifacts,
    VariantTarget, backup_path,
};
pub use descriptor::{DescriptorKind, Replacement, apply_replacements};
pub use error::AppError;
pub use outcome::{
    FailedItem, GeneratedClass, RunHealth, RunReport, Stage, StageOutcome, StageReport,
};
pub use palette::{BrandPalette, PaletteRole};
pub use paths::ScratchLayout;
pub use raster::{RasterArtifact, RasterMatrix};
pub use tool::{ToolError, ToolKind};
