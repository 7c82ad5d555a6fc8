use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// External programs the pipeline delegates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    /// Vector-to-raster converter.
    Rasterizer,
    /// Packs an ordered list of rasters into a Windows icon container.
    IcoPacker,
    /// Packs a staged iconset directory into a macOS icon container.
    IcnsPacker,
}

impl ToolKind {
    /// All tools, in probe order.
    pub const ALL: [ToolKind; 3] = [ToolKind::Rasterizer, ToolKind::IcoPacker, ToolKind::IcnsPacker];

    /// Whether a run must stop before any work when this tool is unavailable.
    /// Only the ICNS container can be skipped.
    pub fn is_required(&self) -> bool {
        matches!(self, ToolKind::Rasterizer | ToolKind::IcoPacker)
    }

    /// Configuration key for this tool.
    pub fn key(&self) -> &'static str {
        match self {
            ToolKind::Rasterizer => "rasterizer",
            ToolKind::IcoPacker => "ico_packer",
            ToolKind::IcnsPacker => "icns_packer",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Typed result of a single external invocation.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The program could not be found on PATH.
    #[error("'{program}' is not installed or not on PATH")]
    Missing { program: String },

    /// The program ran past its deadline and was killed.
    #[error("'{program}' timed out after {seconds}s")]
    TimedOut { program: String, seconds: u64 },

    /// The program exited unsuccessfully.
    #[error("'{program}' exited with {status}: {stderr}")]
    Failed { program: String, status: String, stderr: String },

    /// The program reported success but the expected output is absent.
    #[error("'{program}' produced no output at {output}")]
    NoOutput { program: String, output: String },

    /// Spawning or waiting on the program failed.
    #[error("'{program}' could not be run: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl ToolError {
    /// True when the tool cannot be used at all, as opposed to failing on one input.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ToolError::Missing { .. } | ToolError::TimedOut { .. })
    }
}
