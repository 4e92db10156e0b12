//! Git operations for releases
//!
//! Only tag plumbing lives here: existence checks against a remote, local tag
//! creation, and push. Every call shells out to the `git` binary.
//!
//! # Examples
//!
//! ```no_run
//! use stencil_release::git::TagRemote;
//!
//! # fn example() -> stencil_release::Result<()> {
//! let remote = TagRemote::new("origin");
//! remote.create_and_push("v1.2.3")?;
//! # Ok(())
//! # }
//! ```

mod tag;

pub use tag::{tag_name, TagRemote};
