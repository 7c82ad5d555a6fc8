//! Brand configuration domain models.
//!
//! A single immutable [`BrandConfig`] is built once per run and handed to every
//! pipeline stage. Every section is optional in `brandkit.toml`; omitted values
//! fall back to the built-in CortexIDE branding.

use std::collections::BTreeSet;
use std::time::Duration;

use serde::Deserialize;

use super::asset_spec::{AssetClass, AssetFormat, AssetSpec, TargetSize};
use super::container::ICNS_ENTRIES;
use super::palette::BrandPalette;
use super::tool::ToolKind;
use super::AppError;

/// File name looked up in the branded-product source directory.
pub const CONFIG_FILE: &str = "brandkit.toml";

/// Complete configuration for one run.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BrandConfig {
    /// Product identity used for descriptor patches and scratch names.
    #[serde(default)]
    pub brand: BrandIdentity,
    /// Semantic colors.
    #[serde(default)]
    pub palette: BrandPalette,
    /// Size lists per asset class.
    #[serde(default)]
    pub assets: AssetsConfig,
    /// Build variants under `<builder>/src/`.
    #[serde(default = "default_variants")]
    pub variants: Vec<String>,
    /// External tool invocations.
    #[serde(default)]
    pub tools: ToolsConfig,
}

impl Default for BrandConfig {
    fn default() -> Self {
        Self {
            brand: BrandIdentity::default(),
            palette: BrandPalette::default(),
            assets: AssetsConfig::default(),
            variants: default_variants(),
            tools: ToolsConfig::default(),
        }
    }
}

fn default_variants() -> Vec<String> {
    vec!["stable".to_string(), "insider".to_string()]
}

/// Product naming used when rewriting descriptors.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BrandIdentity {
    /// Display name, e.g. `CortexIDE`.
    #[serde(default = "default_name")]
    pub name: String,
    /// Launcher executable and icon name, e.g. `cortexide`.
    #[serde(default = "default_executable")]
    pub executable: String,
    /// Short product description.
    #[serde(default = "default_tagline")]
    pub tagline: String,
}

impl Default for BrandIdentity {
    fn default() -> Self {
        Self { name: default_name(), executable: default_executable(), tagline: default_tagline() }
    }
}

fn default_name() -> String {
    "CortexIDE".to_string()
}

fn default_executable() -> String {
    "cortexide".to_string()
}

fn default_tagline() -> String {
    "AI-powered Code Editor".to_string()
}

impl BrandIdentity {
    /// Lowercase token used in scratch and summary file names.
    pub fn slug(&self) -> String {
        self.executable.to_ascii_lowercase()
    }
}

/// Target sizes for each asset class.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetsConfig {
    /// Edge of the synthesized vector document.
    #[serde(default = "default_logo_edge")]
    pub logo_edge: u32,
    #[serde(default = "default_icon_sizes")]
    pub icon_sizes: Vec<u32>,
    #[serde(default = "default_logo_sizes")]
    pub logo_sizes: Vec<u32>,
    /// Windows start-menu tile rasters.
    #[serde(default = "default_tile_sizes")]
    pub tile_sizes: Vec<u32>,
    #[serde(default = "default_installer_sizes")]
    pub installer_sizes: Vec<TargetSize>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            logo_edge: default_logo_edge(),
            icon_sizes: default_icon_sizes(),
            logo_sizes: default_logo_sizes(),
            tile_sizes: default_tile_sizes(),
            installer_sizes: default_installer_sizes(),
        }
    }
}

fn default_logo_edge() -> u32 {
    512
}

fn default_icon_sizes() -> Vec<u32> {
    vec![16, 24, 32, 48, 64, 96, 128, 256, 512]
}

fn default_logo_sizes() -> Vec<u32> {
    vec![192, 512, 1024]
}

fn default_tile_sizes() -> Vec<u32> {
    vec![70, 150]
}

fn default_installer_sizes() -> Vec<TargetSize> {
    (100..=250).step_by(25).map(|edge| TargetSize::Rect(edge, edge)).collect()
}

impl AssetsConfig {
    /// Asset specs per class, in class order.
    pub fn specs(&self) -> Vec<AssetSpec> {
        let squares = |sizes: &[u32]| -> Vec<TargetSize> {
            sizes.iter().copied().map(TargetSize::Square).collect()
        };
        let mut icon_sizes = squares(&self.icon_sizes);
        icon_sizes.extend(self.tile_sizes.iter().copied().map(TargetSize::Square));

        vec![
            AssetSpec::new(
                AssetClass::Icon,
                icon_sizes,
                &[AssetFormat::RasterPng, AssetFormat::IconContainerA, AssetFormat::IconContainerB],
            ),
            AssetSpec::new(
                AssetClass::Logo,
                squares(&self.logo_sizes),
                &[AssetFormat::RasterPng, AssetFormat::VectorSvg],
            ),
            AssetSpec::new(AssetClass::Installer, self.installer_sizes.clone(), &[AssetFormat::Bitmap]),
        ]
    }

    /// Every edge any later stage consumes, ascending and de-duplicated.
    pub fn raster_sizes(&self) -> BTreeSet<u32> {
        let mut sizes: BTreeSet<u32> = BTreeSet::new();
        for spec in self.specs() {
            sizes.extend(spec.raster_edges());
        }
        sizes.extend(ICNS_ENTRIES.iter().map(|entry| entry.pixels));
        sizes
    }
}

/// Command line for one external tool. `{input}`, `{inputs}`, `{output}` and
/// `{size}` in `args` are substituted per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSpec {
    pub program: String,
    pub args: Vec<String>,
    pub probe_args: Vec<String>,
}

/// Optional per-tool overrides as written in the config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolOverride {
    pub program: Option<String>,
    pub args: Option<Vec<String>>,
    pub probe_args: Option<Vec<String>>,
}

/// External tool settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolsConfig {
    /// Deadline for every external invocation, probes included.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub rasterizer: ToolOverride,
    #[serde(default)]
    pub ico_packer: ToolOverride,
    #[serde(default)]
    pub icns_packer: ToolOverride,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            rasterizer: ToolOverride::default(),
            ico_packer: ToolOverride::default(),
            icns_packer: ToolOverride::default(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    60
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

impl ToolsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolved command line for a tool, with overrides applied over the defaults.
    pub fn spec(&self, kind: ToolKind) -> ToolSpec {
        let (overrides, program, args) = match kind {
            ToolKind::Rasterizer => (
                &self.rasterizer,
                "rsvg-convert",
                strings(&["--width", "{size}", "--height", "{size}", "--output", "{output}", "{input}"]),
            ),
            ToolKind::IcoPacker => (&self.ico_packer, "convert", strings(&["{inputs}", "{output}"])),
            ToolKind::IcnsPacker => (
                &self.icns_packer,
                "iconutil",
                strings(&["-c", "icns", "{input}", "-o", "{output}"]),
            ),
        };
        ToolSpec {
            program: overrides.program.clone().unwrap_or_else(|| program.to_string()),
            args: overrides.args.clone().unwrap_or(args),
            probe_args: overrides.probe_args.clone().unwrap_or_else(|| strings(&["--version"])),
        }
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::config_error("tools.timeout_secs must be greater than zero"));
        }
        for kind in ToolKind::ALL {
            let spec = self.spec(kind);
            if spec.program.trim().is_empty() {
                return Err(AppError::config_error(format!(
                    "tools.{}.program must not be empty",
                    kind.key()
                )));
            }
            for placeholder in required_placeholders(kind) {
                if !spec.args.iter().any(|arg| arg.contains(placeholder)) {
                    return Err(AppError::config_error(format!(
                        "tools.{}.args must reference {}",
                        kind.key(),
                        placeholder
                    )));
                }
            }
        }
        Ok(())
    }
}

fn required_placeholders(kind: ToolKind) -> &'static [&'static str] {
    match kind {
        ToolKind::Rasterizer => &["{input}", "{size}", "{output}"],
        ToolKind::IcoPacker => &["{inputs}", "{output}"],
        ToolKind::IcnsPacker => &["{input}", "{output}"],
    }
}

/// Variant names become directory names; keep them to a single safe component.
fn is_safe_variant_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
}

impl BrandConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.brand.name.trim().is_empty() {
            return Err(AppError::config_error("brand.name must not be empty"));
        }
        if !is_safe_variant_name(&self.brand.executable) {
            return Err(AppError::config_error(format!(
                "brand.executable '{}' must be a plain file name",
                self.brand.executable
            )));
        }

        self.palette.validate()?;

        if self.assets.logo_edge == 0 {
            return Err(AppError::InvalidDimension { what: "assets.logo_edge".to_string() });
        }
        for spec in self.assets.specs() {
            spec.validate()?;
        }

        if self.variants.is_empty() {
            return Err(AppError::config_error("At least one variant must be configured"));
        }
        let mut seen = BTreeSet::new();
        for variant in &self.variants {
            if !is_safe_variant_name(variant) {
                return Err(AppError::config_error(format!(
                    "Invalid variant name '{}': must be a single directory name",
                    variant
                )));
            }
            if !seen.insert(variant.as_str()) {
                return Err(AppError::config_error(format!("Duplicate variant '{}'", variant)));
            }
        }

        self.tools.validate()
    }
}

/// Parse and validate `brandkit.toml` content.
pub fn parse_config_content(content: &str) -> Result<BrandConfig, AppError> {
    let config: BrandConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}
