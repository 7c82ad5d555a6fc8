pub mod command_toolchain;
pub mod process_runner;

pub use command_toolchain::CommandToolchain;
pub use process_runner::ProcessRunner;
