mod asset_toolchain;

pub use asset_toolchain::AssetToolchain;
