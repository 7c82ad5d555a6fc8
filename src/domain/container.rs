use std::fmt;

use serde::Serialize;

use super::asset_spec::AssetFormat;

/// Native icon-container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    /// Windows `.ico`, packed from an ordered file list.
    Ico,
    /// macOS `.icns`, packed from a staged `.iconset` directory.
    Icns,
}

impl ContainerKind {
    pub const ALL: [ContainerKind; 2] = [ContainerKind::Ico, ContainerKind::Icns];

    pub fn format(&self) -> AssetFormat {
        match self {
            ContainerKind::Ico => AssetFormat::IconContainerA,
            ContainerKind::Icns => AssetFormat::IconContainerB,
        }
    }

    pub fn extension(&self) -> &'static str {
        self.format().extension()
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ContainerKind::Ico => "Windows ICO",
            ContainerKind::Icns => "macOS ICNS",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Sizes packed into the ICO container, in packing order.
pub const ICO_SIZES: [u32; 8] = [16, 24, 32, 48, 64, 96, 128, 256];

/// One file inside an `.iconset` directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IcnsEntry {
    /// Raster edge the entry is staged from.
    pub pixels: u32,
    /// Canonical point size the entry represents.
    pub points: u32,
    /// True for the double-density (`@2x`) variant.
    pub retina: bool,
}

impl IcnsEntry {
    const fn new(points: u32, retina: bool) -> Self {
        let pixels = if retina { points * 2 } else { points };
        Self { pixels, points, retina }
    }

    /// File name required by the iconset convention, e.g. `icon_32x32@2x.png`.
    pub fn file_name(&self) -> String {
        let suffix = if self.retina { "@2x" } else { "" };
        format!("icon_{0}x{0}{1}.png", self.points, suffix)
    }
}

/// Base and double-density entries for each of the five canonical iconset sizes.
pub const ICNS_ENTRIES: [IcnsEntry; 10] = [
    IcnsEntry::new(16, false),
    IcnsEntry::new(16, true),
    IcnsEntry::new(32, false),
    IcnsEntry::new(32, true),
    IcnsEntry::new(128, false),
    IcnsEntry::new(128, true),
    IcnsEntry::new(256, false),
    IcnsEntry::new(256, true),
    IcnsEntry::new(512, false),
    IcnsEntry::new(512, true),
];
