//! brandkit: generate brand assets and deploy them into an editor build tree.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    AppError, GenerateOptions, RunHealth, RunReport, ToolStatus, check_tools, generate,
};
