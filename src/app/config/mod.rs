mod load_config;

pub use load_config::{ConfigSource, load_config};
