//! # stencil-release
//!
//! Release plumbing for template repositories:
//! - Version extraction from `pyproject.toml` (PEP 621, then Poetry)
//! - Remote tag existence checks, tag creation and push
//! - Rewriting private `[[tool.uv.index]]` registries to public PyPI for CI
//!
//! # Examples
//!
//! ## Refuse to release a version that is already tagged
//!
//! ```no_run
//! use camino::Utf8Path;
//! use stencil_release::{extract_version, git::TagRemote};
//!
//! # fn example() -> stencil_release::Result<()> {
//! let version = extract_version(Utf8Path::new("pyproject.toml"))?;
//! let remote = TagRemote::new("origin");
//! remote.ensure_tag_not_present(&format!("v{version}"))?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod git;
pub mod manifest;
pub mod registries;

pub use error::{Error, Result};
pub use manifest::extract_version;
pub use registries::{find_pyproject_files, process_file, rewrite_registries, RegistryRewrite};
