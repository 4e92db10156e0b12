//! Hash-line location and rewriting inside a JSON-with-comments config
//!
//! The file is treated line by line, not parsed: the hash line lives directly
//! above the last line that is only a closing brace. Lines keep their original
//! terminators so untouched lines stay byte-identical, CRLF included.

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tracing::debug;

/// Fixed text preceding the hex value on the hash line
pub const HASH_LINE_PREFIX: &str =
    "  // Devcontainer context hash (do not manually edit this, it's managed by a pre-commit hook): ";

/// Fixed text following the hex value; keeps spellcheckers off the hash
pub const HASH_LINE_SUFFIX: &str = " # spellchecker:disable-line";

/// Where the hash line is, or where it must be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashLineLocation {
    /// Index of the existing hash line, or of the closing brace line when absent
    pub index: usize,
    /// Hash currently recorded, if the line exists
    pub current_hash: Option<String>,
}

/// Format a complete hash line (without terminator)
pub fn format_hash_line(hash: &str) -> String {
    format!("{HASH_LINE_PREFIX}{hash}{HASH_LINE_SUFFIX}")
}

/// Scan from the end for the last brace-only line and inspect the line above it
///
/// Returns `None` when the text has no brace-only line at all.
pub fn locate_hash_line<S: AsRef<str>>(lines: &[S]) -> Option<HashLineLocation> {
    let brace_index = lines.iter().rposition(|line| line.as_ref().trim() == "}")?;

    if brace_index > 0 {
        let above = lines[brace_index - 1].as_ref();
        if let Some(rest) = above.strip_prefix(HASH_LINE_PREFIX) {
            let value = rest.split('#').next().unwrap_or_default().trim();
            return Some(HashLineLocation {
                index: brace_index - 1,
                current_hash: Some(value.to_string()),
            });
        }
    }

    Some(HashLineLocation {
        index: brace_index,
        current_hash: None,
    })
}

/// A config file held as terminator-preserving lines
#[derive(Debug, Clone)]
pub struct AnnotatedConfig {
    path: Utf8PathBuf,
    lines: Vec<String>,
}

impl AnnotatedConfig {
    /// Read a config file from disk
    pub fn read(path: &Utf8Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::config_update(path.as_str(), e))?;
        Ok(Self::from_text(path, &text))
    }

    /// Build from in-memory text; `path` is only used for diagnostics and `write`
    pub fn from_text(path: &Utf8Path, text: &str) -> Self {
        Self {
            path: path.to_owned(),
            lines: text.split_inclusive('\n').map(str::to_string).collect(),
        }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Locate the hash line, failing when no brace-only line exists
    pub fn locate(&self) -> Result<HashLineLocation> {
        locate_hash_line(&self.lines).ok_or_else(|| Error::malformed_config(self.path.as_str()))
    }

    /// Hash currently recorded in the file
    pub fn current_hash(&self) -> Result<Option<String>> {
        Ok(self.locate()?.current_hash)
    }

    /// Replace the existing hash line, or insert one above the closing brace
    pub fn set_hash(&mut self, hash: &str) -> Result<()> {
        let location = self.locate()?;
        let terminator = line_terminator(&self.lines[location.index]);
        let new_line = format!("{}{}", format_hash_line(hash), terminator);

        if location.current_hash.is_some() {
            debug!("Replacing hash line {} in {}", location.index + 1, self.path);
            self.lines[location.index] = new_line;
        } else {
            debug!("Inserting hash line at {} in {}", location.index + 1, self.path);
            self.lines.insert(location.index, new_line);
        }

        Ok(())
    }

    /// Reassemble the file content
    pub fn to_text(&self) -> String {
        self.lines.concat()
    }

    /// Write the full line set back to `path`
    pub fn write(&self) -> Result<()> {
        fs::write(&self.path, self.to_text())
            .map_err(|e| Error::config_update(self.path.as_str(), e))
    }
}

/// Terminator for a new line, borrowed from its neighbour
fn line_terminator(line: &str) -> &'static str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

/// Read the hash currently recorded in `path`
pub fn extract_current_hash(path: &Utf8Path) -> Result<Option<String>> {
    AnnotatedConfig::read(path)?.current_hash()
}

/// Re-read `path`, set its hash line to `new_hash`, and write it back
///
/// Not crash-safe: the file is rewritten in place.
pub fn update_hash(path: &Utf8Path, new_hash: &str) -> Result<()> {
    let mut config = AnnotatedConfig::read(path)?;
    config.set_hash(new_hash)?;
    config.write()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const UNANNOTATED: &str = "{\n  \"name\": \"dev\",\n  \"image\": \"python:3.12\"\n}\n";

    fn annotated(hash: &str) -> String {
        format!(
            "{{\n  \"name\": \"dev\",\n  \"image\": \"python:3.12\"\n{}\n}}\n",
            format_hash_line(hash)
        )
    }

    #[test]
    fn test_locate_without_annotation_points_at_brace() {
        let lines = ["{\n", "  \"a\": 1\n", "}\n"];
        let location = locate_hash_line(&lines).unwrap();
        assert_eq!(location.index, 2);
        assert_eq!(location.current_hash, None);
    }

    #[test]
    fn test_locate_extracts_hash_before_suffix() {
        let text = annotated("deadbeef");
        let config = AnnotatedConfig::from_text(Utf8Path::new("devcontainer.json"), &text);
        let location = config.locate().unwrap();
        assert_eq!(location.index, 3);
        assert_eq!(location.current_hash.as_deref(), Some("deadbeef"));
    }

    #[test]
    fn test_locate_uses_last_brace_only_line() {
        let lines = [
            "{\n",
            "  \"features\": {\n",
            "    \"x\": {}\n",
            "  }\n",
            "}\n",
            "\n",
        ];
        let location = locate_hash_line(&lines).unwrap();
        assert_eq!(location.index, 4);
    }

    #[test]
    fn test_locate_brace_on_first_line() {
        let lines = ["}"];
        let location = locate_hash_line(&lines).unwrap();
        assert_eq!(location.index, 0);
        assert_eq!(location.current_hash, None);
    }

    #[test]
    fn test_locate_without_brace_is_malformed() {
        let config = AnnotatedConfig::from_text(Utf8Path::new("broken.json"), "{ \"a\": 1 }\n");
        let err = config.locate().unwrap_err();
        assert!(matches!(err, Error::MalformedConfig { ref path } if path == "broken.json"));
    }

    #[test]
    fn test_hash_without_suffix_still_parses() {
        let lines = [
            "{\n".to_string(),
            format!("{HASH_LINE_PREFIX}0badf00d  \n"),
            "}\n".to_string(),
        ];
        let location = locate_hash_line(&lines).unwrap();
        assert_eq!(location.current_hash.as_deref(), Some("0badf00d"));
    }

    #[test]
    fn test_insert_adds_exactly_one_line_above_brace() {
        let mut config = AnnotatedConfig::from_text(Utf8Path::new("d.json"), UNANNOTATED);
        let before = config.lines().len();

        config.set_hash("cafef00d").unwrap();

        assert_eq!(config.lines().len(), before + 1);
        assert_eq!(config.to_text(), annotated("cafef00d"));
        assert_eq!(config.current_hash().unwrap().as_deref(), Some("cafef00d"));
    }

    #[test]
    fn test_replace_preserves_every_other_line() {
        let original = annotated("deadbeef");
        let mut config = AnnotatedConfig::from_text(Utf8Path::new("d.json"), &original);
        let before = config.lines().to_vec();

        config.set_hash("cafef00d").unwrap();
        let after = config.lines();

        assert_eq!(after.len(), before.len());
        for (i, (old, new)) in before.iter().zip(after.iter()).enumerate() {
            if i == 3 {
                assert_eq!(new, &format!("{}\n", format_hash_line("cafef00d")));
            } else {
                assert_eq!(old, new);
            }
        }
    }

    #[test]
    fn test_crlf_lines_are_preserved() {
        let original = "{\r\n  \"a\": 1\r\n}\r\n";
        let mut config = AnnotatedConfig::from_text(Utf8Path::new("d.json"), original);
        config.set_hash("00000001").unwrap();

        assert_eq!(
            config.to_text(),
            format!("{{\r\n  \"a\": 1\r\n{}\r\n}}\r\n", format_hash_line("00000001"))
        );
    }

    #[test]
    fn test_missing_trailing_newline_is_kept() {
        let mut config = AnnotatedConfig::from_text(Utf8Path::new("d.json"), "{\n  \"a\": 1\n}");
        config.set_hash("00000001").unwrap();
        assert_eq!(
            config.to_text(),
            format!("{{\n  \"a\": 1\n{}\n}}", format_hash_line("00000001"))
        );
    }

    #[test]
    fn test_update_hash_round_trip_on_disk() {
        let temp = TempDir::new().unwrap();
        let path = Utf8PathBuf::from_path_buf(temp.path().join("devcontainer.json")).unwrap();
        fs::write(&path, UNANNOTATED).unwrap();

        assert_eq!(extract_current_hash(&path).unwrap(), None);
        update_hash(&path, "12345678").unwrap();
        assert_eq!(
            extract_current_hash(&path).unwrap().as_deref(),
            Some("12345678")
        );

        update_hash(&path, "87654321").unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, annotated("87654321"));
    }

    #[test]
    fn test_update_malformed_file_does_not_write() {
        let temp = TempDir::new().unwrap();
        let path = Utf8PathBuf::from_path_buf(temp.path().join("devcontainer.json")).unwrap();
        fs::write(&path, "not json at all\n").unwrap();

        assert!(update_hash(&path, "12345678").is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "not json at all\n");
    }

    #[test]
    fn test_unreadable_config_error_names_path() {
        let temp = TempDir::new().unwrap();
        let path = Utf8PathBuf::from_path_buf(temp.path().join("devcontainer.json")).unwrap();

        match update_hash(&path, "12345678").unwrap_err() {
            Error::ConfigUpdate { path: reported, source } => {
                assert_eq!(reported, path.as_str());
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
