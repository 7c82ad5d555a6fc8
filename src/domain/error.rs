use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::tool::ToolError;

/// Library-wide error type for brandkit operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// A palette role carries a value that is not a color.
    #[error("Invalid color for palette role '{role}': '{value}' (expected #rgb, #rrggbb or #rrggbbaa)")]
    InvalidColor { role: String, value: String },

    /// A size or edge length is zero.
    #[error("Invalid dimension for {what}: sizes must be positive integers")]
    InvalidDimension { what: String },

    /// A required input directory does not exist.
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// One or more external tools cannot be executed at all.
    #[error("Required external tools are unavailable: {0}")]
    ToolsUnavailable(String),

    /// An external tool invocation failed.
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// A stage had none of the inputs it needs.
    #[error("No inputs available for {0}")]
    MissingInputs(String),

    /// Embedded template failed to render.
    #[error("Template '{name}' failed to render: {details}")]
    Template { name: String, details: String },

    /// Report serialization failed.
    #[error("Failed to serialize run report: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }
}
