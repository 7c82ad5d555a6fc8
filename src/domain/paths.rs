use std::path::{Path, PathBuf};

use super::container::ContainerKind;

/// Intermediate artifact naming inside the builder directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchLayout {
    dir: PathBuf,
    slug: String,
}

impl ScratchLayout {
    pub fn new(dir: &Path, slug: &str) -> Self {
        Self { dir: dir.to_path_buf(), slug: slug.to_string() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `temp_<slug>_logo.svg`
    pub fn vector(&self) -> PathBuf {
        self.dir.join(format!("temp_{}_logo.svg", self.slug))
    }

    /// `temp_<slug>_<size>.png`
    pub fn raster(&self, size: u32) -> PathBuf {
        self.dir.join(format!("temp_{}_{}.png", self.slug, size))
    }

    /// `temp_<slug>.ico` / `temp_<slug>.icns`
    pub fn container(&self, kind: ContainerKind) -> PathBuf {
        self.dir.join(format!("temp_{}.{}", self.slug, kind.extension()))
    }

    /// `<slug>.iconset/`
    pub fn iconset_dir(&self) -> PathBuf {
        self.dir.join(format!("{}.iconset", self.slug))
    }

    /// True for any name this layout produces, including rasters of sizes not
    /// requested in the current run.
    pub fn is_scratch_name(&self, name: &str) -> bool {
        let fixed = [
            format!("temp_{}_logo.svg", self.slug),
            format!("temp_{}.ico", self.slug),
            format!("temp_{}.icns", self.slug),
            format!("{}.iconset", self.slug),
        ];
        if fixed.iter().any(|candidate| candidate == name) {
            return true;
        }
        let prefix = format!("temp_{}_", self.slug);
        name.strip_prefix(&prefix)
            .and_then(|rest| rest.strip_suffix(".png"))
            .is_some_and(|size| !size.is_empty() && size.chars().all(|c| c.is_ascii_digit()))
    }
}

/// `<builder>/<slug>-asset-generation-summary.md`
pub fn summary_path(builder_dir: &Path, slug: &str) -> PathBuf {
    builder_dir.join(format!("{slug}-asset-generation-summary.md"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_names() {
        let layout = ScratchLayout::new(Path::new("/b"), "cortexide");
        assert_eq!(layout.vector(), PathBuf::from("/b/temp_cortexide_logo.svg"));
        assert_eq!(layout.raster(48), PathBuf::from("/b/temp_cortexide_48.png"));
        assert_eq!(layout.container(ContainerKind::Icns), PathBuf::from("/b/temp_cortexide.icns"));
        assert_eq!(layout.iconset_dir(), PathBuf::from("/b/cortexide.iconset"));
    }

    #[test]
    fn recognises_only_its_own_names() {
        let layout = ScratchLayout::new(Path::new("/b"), "cortexide");
        assert!(layout.is_scratch_name("temp_cortexide_logo.svg"));
        assert!(layout.is_scratch_name("temp_cortexide_1024.png"));
        assert!(layout.is_scratch_name("temp_cortexide.ico"));
        assert!(layout.is_scratch_name("cortexide.iconset"));
        assert!(!layout.is_scratch_name("temp_cortexide_.png"));
        assert!(!layout.is_scratch_name("temp_cortexide_big.png"));
        assert!(!layout.is_scratch_name("temp_other_16.png"));
        assert!(!layout.is_scratch_name("cortexide-asset-generation-summary.md"));
    }

    #[test]
    fn summary_lives_in_builder_dir() {
        assert_eq!(
            summary_path(Path::new("/b"), "cortexide"),
            PathBuf::from("/b/cortexide-asset-generation-summary.md")
        );
    }
}
