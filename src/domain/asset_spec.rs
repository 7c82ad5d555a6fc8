use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::AppError;

/// Classes of generated assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    Icon,
    Logo,
    Installer,
}

impl AssetClass {
    pub const ALL: [AssetClass; 3] = [AssetClass::Icon, AssetClass::Logo, AssetClass::Installer];

    pub fn display_name(&self) -> &'static str {
        match self {
            AssetClass::Icon => "Icons",
            AssetClass::Logo => "Logos",
            AssetClass::Installer => "Installer graphics",
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Output formats an asset class may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetFormat {
    RasterPng,
    /// Windows `.ico` container.
    IconContainerA,
    /// macOS `.icns` container.
    IconContainerB,
    VectorSvg,
    Bitmap,
}

impl AssetFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            AssetFormat::RasterPng => "png",
            AssetFormat::IconContainerA => "ico",
            AssetFormat::IconContainerB => "icns",
            AssetFormat::VectorSvg => "svg",
            AssetFormat::Bitmap => "bmp",
        }
    }
}

/// Target edge length, or a width × height pair for non-square targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TargetSize {
    Square(u32),
    Rect(u32, u32),
}

impl TargetSize {
    /// Edge length when the target is square.
    pub fn edge(&self) -> Option<u32> {
        match *self {
            TargetSize::Square(edge) => Some(edge),
            TargetSize::Rect(width, height) if width == height => Some(width),
            TargetSize::Rect(..) => None,
        }
    }

    fn is_positive(&self) -> bool {
        match *self {
            TargetSize::Square(edge) => edge > 0,
            TargetSize::Rect(width, height) => width > 0 && height > 0,
        }
    }
}

impl fmt::Display for TargetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetSize::Square(edge) => write!(f, "{edge}x{edge}"),
            TargetSize::Rect(width, height) => write!(f, "{width}x{height}"),
        }
    }
}

/// Sizes and formats required for one asset class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSpec {
    pub class: AssetClass,
    pub sizes: Vec<TargetSize>,
    pub formats: BTreeSet<AssetFormat>,
}

impl AssetSpec {
    pub fn new(class: AssetClass, sizes: Vec<TargetSize>, formats: &[AssetFormat]) -> Self {
        Self { class, sizes, formats: formats.iter().copied().collect() }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.sizes.iter().any(|size| !size.is_positive()) {
            return Err(AppError::InvalidDimension {
                what: format!("{} sizes", self.class.display_name().to_lowercase()),
            });
        }
        Ok(())
    }

    /// Square edges this class needs rasterized as PNG. Classes without the
    /// PNG format, and non-square targets, need none.
    pub fn raster_edges(&self) -> impl Iterator<Item = u32> + '_ {
        let wants_png = self.formats.contains(&AssetFormat::RasterPng);
        self.sizes.iter().filter(move |_| wants_png).filter_map(TargetSize::edge)
    }
}
