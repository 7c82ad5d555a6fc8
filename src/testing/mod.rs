pub mod fake_toolchain;

#[allow(unused_imports)]
pub use fake_toolchain::FakeToolchain;
