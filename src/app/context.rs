use std::path::{Path, PathBuf};

use crate::domain::{BrandConfig, ScratchLayout, VariantTarget};
use crate::ports::AssetToolchain;

/// Application context holding dependencies for a pipeline run.
pub struct AppContext<T: AssetToolchain> {
    config: BrandConfig,
    toolchain: T,
    builder_dir: PathBuf,
    source_dir: PathBuf,
}

impl<T: AssetToolchain> AppContext<T> {
    /// Create a new application context.
    pub fn new(config: BrandConfig, toolchain: T, builder_dir: PathBuf, source_dir: PathBuf) -> Self {
        Self { config, toolchain, builder_dir, source_dir }
    }

    pub fn config(&self) -> &BrandConfig {
        &self.config
    }

    pub fn toolchain(&self) -> &T {
        &self.toolchain
    }

    pub fn builder_dir(&self) -> &Path {
        &self.builder_dir
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Scratch naming inside the builder directory.
    pub fn scratch(&self) -> ScratchLayout {
        ScratchLayout::new(&self.builder_dir, &self.config.brand.slug())
    }

    /// Configured variants, resolved against the builder directory.
    pub fn variants(&self) -> Vec<VariantTarget> {
        self.config
            .variants
            .iter()
            .map(|name| VariantTarget::under(&self.builder_dir, name))
            .collect()
    }
}
