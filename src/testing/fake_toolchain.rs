use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::domain::{ToolError, ToolKind};
use crate::ports::AssetToolchain;

/// In-memory stand-in for the external tools. Writes small marker files so
/// later stages see real paths on disk.
#[derive(Default)]
pub struct FakeToolchain {
    pub failing_sizes: BTreeSet<u32>,
    pub missing_tools: BTreeSet<ToolKind>,
    pub fail_ico: bool,
    pub fail_icns: bool,
    pub rasterized: Mutex<Vec<u32>>,
    pub ico_inputs: Mutex<Vec<Vec<PathBuf>>>,
    pub icns_staged: Mutex<Vec<Vec<String>>>,
    pub probed: Mutex<Vec<ToolKind>>,
}

impl FakeToolchain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failing_sizes(mut self, sizes: &[u32]) -> Self {
        self.failing_sizes.extend(sizes.iter().copied());
        self
    }

    pub fn with_missing_tool(mut self, tool: ToolKind) -> Self {
        self.missing_tools.insert(tool);
        self
    }

    pub fn failing_ico(mut self) -> Self {
        self.fail_ico = true;
        self
    }

    pub fn failing_icns(mut self) -> Self {
        self.fail_icns = true;
        self
    }

    pub fn rasterized_sizes(&self) -> Vec<u32> {
        let mut sizes = self.rasterized.lock().unwrap().clone();
        sizes.sort_unstable();
        sizes
    }

    fn missing(&self, tool: ToolKind) -> Result<(), ToolError> {
        if self.missing_tools.contains(&tool) {
            return Err(ToolError::Missing { program: tool.key().to_string() });
        }
        Ok(())
    }

    fn failure(program: &str) -> ToolError {
        ToolError::Failed {
            program: program.to_string(),
            status: "exit status: 1".to_string(),
            stderr: "simulated failure".to_string(),
        }
    }
}

impl AssetToolchain for FakeToolchain {
    fn probe(&self, tool: ToolKind) -> Result<(), ToolError> {
        self.probed.lock().unwrap().push(tool);
        self.missing(tool)
    }

    fn rasterize(&self, source: &Path, size: u32, output: &Path) -> Result<(), ToolError> {
        self.rasterized.lock().unwrap().push(size);
        self.missing(ToolKind::Rasterizer)?;
        if self.failing_sizes.contains(&size) {
            return Err(Self::failure("rasterizer"));
        }
        if !source.exists() {
            return Err(Self::failure("rasterizer"));
        }
        fs::write(output, format!("png:{size}"))
            .map_err(|source| ToolError::Io { program: "rasterizer".into(), source })
    }

    fn pack_ico(&self, inputs: &[PathBuf], output: &Path) -> Result<(), ToolError> {
        self.ico_inputs.lock().unwrap().push(inputs.to_vec());
        self.missing(ToolKind::IcoPacker)?;
        if self.fail_ico {
            return Err(Self::failure("ico_packer"));
        }
        let mut packed = String::new();
        for input in inputs {
            let content = fs::read_to_string(input)
                .map_err(|source| ToolError::Io { program: "ico_packer".into(), source })?;
            packed.push_str(&content);
            packed.push('\n');
        }
        fs::write(output, packed)
            .map_err(|source| ToolError::Io { program: "ico_packer".into(), source })
    }

    fn pack_icns(&self, iconset_dir: &Path, output: &Path) -> Result<(), ToolError> {
        let mut names: Vec<String> = fs::read_dir(iconset_dir)
            .map_err(|source| ToolError::Io { program: "icns_packer".into(), source })?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        self.icns_staged.lock().unwrap().push(names.clone());
        self.missing(ToolKind::IcnsPacker)?;
        if self.fail_icns {
            return Err(Self::failure("icns_packer"));
        }
        fs::write(output, names.join("\n"))
            .map_err(|source| ToolError::Io { program: "icns_packer".into(), source })
    }
}
