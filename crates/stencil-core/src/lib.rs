//! # stencil-core
//!
//! Core library for the stencil CLI providing:
//! - Hierarchical configuration loading (embedded defaults, stencil.yaml, STENCIL_* env)
//! - The version-pin context handed to template rendering
//! - Tera rendering of template files against that context

pub mod config;
pub mod error;
pub mod templates;

pub use config::{ConfigLoader, HashConfig, ReleaseConfig, StencilConfig, ToolingConfig};
pub use error::{Error, Result};
pub use templates::{TemplateRenderer, VersionContext};
