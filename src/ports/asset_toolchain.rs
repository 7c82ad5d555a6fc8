use std::path::{Path, PathBuf};

use crate::domain::{ToolError, ToolKind};

/// Port for the external rasterizer and icon-container packers.
///
/// Implementations must be shareable across threads: rasterization fans out per size.
pub trait AssetToolchain: Sync {
    /// Run the tool's version probe.
    fn probe(&self, tool: ToolKind) -> Result<(), ToolError>;

    /// Render `source` to a square raster of `size` pixels at `output`.
    fn rasterize(&self, source: &Path, size: u32, output: &Path) -> Result<(), ToolError>;

    /// Pack rasters, in the order given, into an ICO container.
    fn pack_ico(&self, inputs: &[PathBuf], output: &Path) -> Result<(), ToolError>;

    /// Pack a staged `.iconset` directory into an ICNS container.
    fn pack_icns(&self, iconset_dir: &Path, output: &Path) -> Result<(), ToolError>;
}
