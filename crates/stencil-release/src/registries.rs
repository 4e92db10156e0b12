//! Private package registry rewrite
//!
//! CI for generated projects cannot reach private indexes. Any manifest whose
//! `[[tool.uv.index]]` blocks declare a default index gets all of those blocks
//! removed and a public PyPI block appended instead.
//!
//! A block runs from its header to the next line starting with `[[`, or to the
//! end of the file, so single-bracket tables that follow an index block are
//! part of it.

use crate::error::Result;
use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;
use std::fs;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Manifest name searched for
const PYPROJECT: &str = "pyproject.toml";

/// Root-relative depth limit: `a/b/pyproject.toml` is the deepest visited
const MAX_DEPTH: usize = 3;

/// Block appended when private indexes are removed
pub const PUBLIC_INDEX_BLOCK: &str =
    "[[tool.uv.index]]\nname = \"pypi\"\nurl = \"https://pypi.org/simple/\"\n";

/// What happened to one manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryRewrite {
    Updated,
    Unchanged,
}

/// Find every `pyproject.toml` at most three path components below `root`
pub fn find_pyproject_files(root: &Utf8Path) -> Vec<Utf8PathBuf> {
    let mut found = Vec::new();

    for entry in WalkDir::new(root).min_depth(1).max_depth(MAX_DEPTH) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", root, e);
                continue;
            }
        };

        if !entry.file_type().is_file() || entry.file_name() != PYPROJECT {
            continue;
        }

        match Utf8PathBuf::from_path_buf(entry.into_path()) {
            Ok(path) => found.push(path),
            Err(path) => warn!("Skipping non UTF-8 path: {}", path.display()),
        }
    }

    found.sort();
    found
}

/// Byte ranges of every `[[tool.uv.index]]` block in `content`
fn index_blocks(content: &str) -> Result<Vec<(usize, usize)>> {
    let header = Regex::new(r"\[\[tool\.uv\.index\]\]")?;
    // The final block stops short of a single trailing newline
    let content_end = content.strip_suffix('\n').map_or(content.len(), str::len);

    let mut blocks = Vec::new();
    let mut search_from = 0;

    while let Some(found) = header.find_at(content, search_from) {
        let start = found.start();
        let end = content[found.end()..]
            .find("\n[[")
            .map_or(content_end, |offset| found.end() + offset);
        blocks.push((start, end));
        search_from = end;
    }

    Ok(blocks)
}

/// Rewrite manifest text, or `None` when no index block sets `default = true`
pub fn rewrite_registries(content: &str) -> Result<Option<String>> {
    let blocks = index_blocks(content)?;

    let has_default = blocks
        .iter()
        .any(|&(start, end)| content[start..end].contains("default = true"));
    if !has_default {
        return Ok(None);
    }

    let mut rewritten = String::with_capacity(content.len());
    let mut cursor = 0;
    for (start, end) in blocks {
        rewritten.push_str(&content[cursor..start]);
        cursor = end;
    }
    rewritten.push_str(&content[cursor..]);

    if !rewritten.ends_with('\n') {
        rewritten.push('\n');
    }
    rewritten.push_str(PUBLIC_INDEX_BLOCK);

    Ok(Some(rewritten))
}

/// Apply the rewrite to one manifest on disk
pub fn process_file(path: &Utf8Path) -> Result<RegistryRewrite> {
    let content = fs::read_to_string(path)?;

    match rewrite_registries(&content)? {
        Some(rewritten) => {
            fs::write(path, rewritten)?;
            debug!("Replaced private registries in {}", path);
            Ok(RegistryRewrite::Updated)
        }
        None => Ok(RegistryRewrite::Unchanged),
    }
}
