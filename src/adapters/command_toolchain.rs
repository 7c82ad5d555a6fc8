use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::process_runner::ProcessRunner;
use crate::domain::config::ToolsConfig;
use crate::domain::{ToolError, ToolKind, ToolSpec};
use crate::ports::AssetToolchain;

/// Values substituted into a tool's argument template.
#[derive(Debug, Default)]
struct Placeholders<'a> {
    input: Option<&'a Path>,
    inputs: &'a [PathBuf],
    output: Option<&'a Path>,
    size: Option<u32>,
}

/// Expand `{input}`, `{output}` and `{size}` inside each argument. An argument
/// that is exactly `{inputs}` expands to one argument per input path.
fn expand_args(template: &[String], values: &Placeholders<'_>) -> Vec<OsString> {
    let mut args = Vec::with_capacity(template.len() + values.inputs.len());
    for arg in template {
        if arg == "{inputs}" {
            args.extend(values.inputs.iter().map(|path| path.as_os_str().to_os_string()));
            continue;
        }
        let mut expanded = arg.clone();
        if let Some(input) = values.input {
            expanded = expanded.replace("{input}", &input.to_string_lossy());
        }
        if let Some(output) = values.output {
            expanded = expanded.replace("{output}", &output.to_string_lossy());
        }
        if let Some(size) = values.size {
            expanded = expanded.replace("{size}", &size.to_string());
        }
        args.push(OsString::from(expanded));
    }
    args
}

/// `AssetToolchain` backed by real subprocesses (rsvg-convert, ImageMagick, iconutil by default).
#[derive(Debug, Clone)]
pub struct CommandToolchain {
    rasterizer: ToolSpec,
    ico_packer: ToolSpec,
    icns_packer: ToolSpec,
    runner: ProcessRunner,
}

impl CommandToolchain {
    pub fn new(tools: &ToolsConfig) -> Self {
        Self {
            rasterizer: tools.spec(ToolKind::Rasterizer),
            ico_packer: tools.spec(ToolKind::IcoPacker),
            icns_packer: tools.spec(ToolKind::IcnsPacker),
            runner: ProcessRunner::new(tools.timeout()),
        }
    }

    fn spec(&self, tool: ToolKind) -> &ToolSpec {
        match tool {
            ToolKind::Rasterizer => &self.rasterizer,
            ToolKind::IcoPacker => &self.ico_packer,
            ToolKind::IcnsPacker => &self.icns_packer,
        }
    }

    fn invoke(&self, tool: ToolKind, values: &Placeholders<'_>) -> Result<(), ToolError> {
        let spec = self.spec(tool);
        let args = expand_args(&spec.args, values);
        debug!(tool = %tool, program = %spec.program, ?args, "invoking external tool");

        // A leftover from an earlier run must not pass for fresh output.
        if let Some(output) = values.output {
            match fs::remove_file(output) {
                Ok(()) => debug!(path = %output.display(), "removed stale tool output"),
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(source) => return Err(ToolError::Io { program: spec.program.clone(), source }),
            }
        }
        self.runner.run(&spec.program, &args)?;

        // Trust the file, not the exit code.
        if let Some(output) = values.output
            && !output.exists()
        {
            return Err(ToolError::NoOutput {
                program: spec.program.clone(),
                output: output.display().to_string(),
            });
        }
        Ok(())
    }
}

impl AssetToolchain for CommandToolchain {
    fn probe(&self, tool: ToolKind) -> Result<(), ToolError> {
        let spec = self.spec(tool);
        let args: Vec<OsString> = spec.probe_args.iter().map(OsString::from).collect();
        self.runner.run(&spec.program, &args)
    }

    fn rasterize(&self, source: &Path, size: u32, output: &Path) -> Result<(), ToolError> {
        let values = Placeholders {
            input: Some(source),
            output: Some(output),
            size: Some(size),
            ..Placeholders::default()
        };
        self.invoke(ToolKind::Rasterizer, &values)
    }

    fn pack_ico(&self, inputs: &[PathBuf], output: &Path) -> Result<(), ToolError> {
        let values = Placeholders { inputs, output: Some(output), ..Placeholders::default() };
        self.invoke(ToolKind::IcoPacker, &values)
    }

    fn pack_icns(&self, iconset_dir: &Path, output: &Path) -> Result<(), ToolError> {
        let values =
            Placeholders { input: Some(iconset_dir), output: Some(output), ..Placeholders::default() };
        self.invoke(ToolKind::IcnsPacker, &values)
    }
}
