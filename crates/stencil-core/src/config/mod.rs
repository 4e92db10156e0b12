//! Configuration loading and management

pub(crate) mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{HashConfig, ReleaseConfig, StencilConfig, ToolingConfig};
