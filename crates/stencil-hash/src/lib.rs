//! # stencil-hash
//!
//! Computes a deterministic checksum over the git-tracked files that define a
//! devcontainer build context, and keeps an annotated copy of that checksum in
//! the devcontainer config file so CI can tell when the image must be rebuilt.
//!
//! The pipeline is strictly sequential:
//! tracked-file enumeration → context filtering → Adler-32 checksum →
//! hash-line location → conditional rewrite → exit-status decision.
//!
//! # Example
//!
//! ```no_run
//! use camino::Utf8Path;
//! use stencil_hash::{HashEngine, HashMode};
//!
//! # fn example() -> stencil_hash::Result<()> {
//! let engine = HashEngine::git(Default::default());
//! let plan = engine.plan(Utf8Path::new("."), HashMode::DevcontainerUpdate)?;
//! let outcome = engine.execute(&plan)?;
//! std::process::exit(outcome.exit_code(false).into());
//! # }
//! ```

pub mod annotation;
pub mod checksum;
pub mod engine;
pub mod error;
pub mod filter;
pub mod tracked;

pub use annotation::{
    extract_current_hash, format_hash_line, locate_hash_line, update_hash, AnnotatedConfig,
    HashLineLocation, HASH_LINE_PREFIX, HASH_LINE_SUFFIX,
};
pub use checksum::{compute_checksum, Checksum};
pub use engine::{HashEngine, HashMode, HashOutcome, HashPlan};
pub use error::{Error, Result};
pub use filter::{ContextFilter, ContextSelection, PathRole};
pub use tracked::{GitTrackedFiles, TrackedFileSource};
