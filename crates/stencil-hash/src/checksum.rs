//! Adler-32 checksum over a set of repository files
//!
//! Paths are sorted before hashing, so the result never depends on the order
//! the caller or the filesystem yields them. Each path contributes its UTF-8
//! name first (renames change the checksum), then its content streamed in
//! fixed-size chunks.

use crate::error::{Error, Result};
use adler2::Adler32;
use camino::Utf8Path;
use std::fmt;
use std::fs::File;
use std::io::{ErrorKind, Read};
use tracing::debug;

/// Read buffer size; large files are never loaded whole
const CHUNK_SIZE: usize = 4096;

/// A 32-bit Adler checksum, displayed as 8 lowercase hex digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Checksum(u32);

impl Checksum {
    /// Adler-32 starting value
    pub const SEED: u32 = 1;

    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// Lowercase, zero-padded hex form written into the hash line
    pub fn to_hex(self) -> String {
        format!("{:08x}", self.0)
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

/// Compute the combined checksum of `paths` (relative to `root`)
///
/// A path that resolves to a directory (submodules, or symlinks some
/// platforms report as directories) still contributes its name but is
/// otherwise skipped. Any other open or read failure aborts the computation.
pub fn compute_checksum<S: AsRef<str>>(root: &Utf8Path, paths: &[S]) -> Result<Checksum> {
    let mut sorted: Vec<&str> = paths.iter().map(|p| p.as_ref()).collect();
    sorted.sort_unstable();

    let mut adler = Adler32::from_checksum(Checksum::SEED);

    for relative in sorted {
        adler.write_slice(relative.as_bytes());

        let full_path = root.join(relative);
        if full_path.is_dir() {
            debug!("Skipping directory-like entry: {}", relative);
            continue;
        }

        match feed_file(&mut adler, &full_path) {
            Ok(bytes) => debug!("Hashed {} ({} bytes)", relative, bytes),
            Err(e) if e.kind() == ErrorKind::IsADirectory => {
                debug!("Skipping directory-like entry: {}", relative);
            }
            Err(e) => return Err(Error::file_read(relative, e)),
        }
    }

    Ok(Checksum(adler.checksum()))
}

/// Stream a file into the accumulator, returning the byte count
fn feed_file(adler: &mut Adler32, path: &Utf8Path) -> std::io::Result<u64> {
    let mut file = File::open(path)?;
    let mut buffer = [0u8; CHUNK_SIZE];
    let mut total = 0u64;

    loop {
        let read = match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        adler.write_slice(&buffer[..read]);
        total += read as u64;
    }

    Ok(total)
}
