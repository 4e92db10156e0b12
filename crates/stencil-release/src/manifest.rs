//! Version extraction from `pyproject.toml`

use crate::error::{Error, Result};
use camino::Utf8Path;
use std::fs;
use toml::{Table, Value};
use tracing::debug;

/// Read the project version from a manifest
///
/// Checks `[project].version` (PEP 621) first, then `[tool.poetry].version`.
/// Empty strings count as unset.
pub fn extract_version(path: &Utf8Path) -> Result<String> {
    if !path.is_file() {
        return Err(Error::manifest_not_found(path.as_str()));
    }

    let content = fs::read_to_string(path)?;
    let data: Table =
        toml::from_str(&content).map_err(|e| Error::toml_parse(path.as_str(), e))?;

    let pep621 = data.get("project").and_then(version_of);
    let poetry = data
        .get("tool")
        .and_then(|t| t.get("poetry"))
        .and_then(version_of);

    match pep621.or(poetry) {
        Some(version) => {
            debug!("Extracted version {} from {}", version, path);
            Ok(version.to_string())
        }
        None => Err(Error::missing_version(path.as_str())),
    }
}

fn version_of(table: &Value) -> Option<&str> {
    table
        .get("version")
        .and_then(Value::as_str)
        .filter(|v| !v.is_empty())
}
