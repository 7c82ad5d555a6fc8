//! Shared testing utilities for brandkit CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Stand-in rasterizer: `raster <size> <input> <output>`. Fails for the size
/// named in `BRANDKIT_FAIL_SIZE`.
const FAKE_RASTERIZER: &str = r#"#!/bin/sh
if [ "$1" = "--version" ]; then echo "fake-raster 1.0"; exit 0; fi
if [ -n "$BRANDKIT_FAIL_SIZE" ] && [ "$1" = "$BRANDKIT_FAIL_SIZE" ]; then
  echo "cannot render $1" >&2
  exit 1
fi
[ -f "$2" ] || exit 2
printf 'png:%s\n' "$1" > "$3"
"#;

/// Stand-in ICO packer: `ico <output> <inputs...>`, concatenating inputs in order.
const FAKE_ICO_PACKER: &str = r#"#!/bin/sh
if [ "$1" = "--version" ]; then exit 0; fi
out="$1"
shift
cat "$@" > "$out"
"#;

/// Stand-in ICNS packer: `icns <iconset> <output>`, listing the staged entries.
const FAKE_ICNS_PACKER: &str = r#"#!/bin/sh
if [ "$1" = "--version" ]; then exit 0; fi
ls "$1" > "$2"
"#;

/// Testing harness providing an isolated builder/source tree and fake tools.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    builder_dir: PathBuf,
    source_dir: PathBuf,
    bin_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment with fake tools and a brandkit.toml
    /// pointing at them.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let builder_dir = root.path().join("builder");
        let source_dir = root.path().join("source");
        let bin_dir = root.path().join("bin");
        for dir in [&builder_dir, &source_dir, &bin_dir] {
            fs::create_dir_all(dir).expect("Failed to create test directory");
        }

        let ctx = Self { root, builder_dir, source_dir, bin_dir };
        ctx.install_tool("raster", FAKE_RASTERIZER);
        ctx.install_tool("ico", FAKE_ICO_PACKER);
        ctx.install_tool("icns", FAKE_ICNS_PACKER);
        ctx.write_config("");
        ctx
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn builder_dir(&self) -> &Path {
        &self.builder_dir
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Root of a variant's resource tree.
    pub fn variant_dir(&self, variant: &str) -> PathBuf {
        self.builder_dir.join("src").join(variant)
    }

    /// Build a command invoking `brandkit <builder> <source>`.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("brandkit").expect("Failed to locate brandkit binary");
        cmd.arg(&self.builder_dir).arg(&self.source_dir).env_remove("RUST_LOG");
        cmd
    }

    fn install_tool(&self, name: &str, script: &str) -> PathBuf {
        let path = self.bin_dir.join(name);
        fs::write(&path, script).expect("Failed to write fake tool");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
                .expect("Failed to mark fake tool executable");
        }
        path
    }

    /// Write `<source>/brandkit.toml` wired to the fake tools, with `extra`
    /// appended as additional top-level TOML.
    pub fn write_config(&self, extra: &str) {
        let content = format!(
            r#"{extra}

[assets]
icon_sizes = [16, 32, 48, 128, 256]

[tools]
timeout_secs = 10

[tools.rasterizer]
program = "{raster}"
args = ["{{size}}", "{{input}}", "{{output}}"]

[tools.ico_packer]
program = "{ico}"
args = ["{{output}}", "{{inputs}}"]

[tools.icns_packer]
program = "{icns}"
args = ["{{input}}", "{{output}}"]
"#,
            raster = self.bin_dir.join("raster").display(),
            ico = self.bin_dir.join("ico").display(),
            icns = self.bin_dir.join("icns").display(),
        );
        fs::write(self.source_dir.join("brandkit.toml"), content)
            .expect("Failed to write brandkit.toml");
    }

    /// Seed a descriptor file inside a variant.
    pub fn write_descriptor(&self, variant: &str, relative: &str, content: &str) -> PathBuf {
        let path = self.variant_dir(variant).join(relative);
        fs::create_dir_all(path.parent().expect("descriptor has a parent"))
            .expect("Failed to create descriptor directory");
        fs::write(&path, content).expect("Failed to write descriptor");
        path
    }

    /// Names in the builder directory that look like intermediate artifacts.
    pub fn scratch_leftovers(&self) -> Vec<String> {
        fs::read_dir(&self.builder_dir)
            .expect("Failed to read builder directory")
            .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().to_string())
            .filter(|name| name.starts_with("temp_") || name.ends_with(".iconset"))
            .collect()
    }

    pub fn summary_path(&self) -> PathBuf {
        self.builder_dir.join("cortexide-asset-generation-summary.md")
    }
}
