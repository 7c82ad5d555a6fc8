pub mod cleanup;
pub mod deploy;
pub mod generate;
pub mod pack;
pub mod patch;
mod protected_write;
pub mod rasterize;
pub mod summary;
pub mod synthesize;
