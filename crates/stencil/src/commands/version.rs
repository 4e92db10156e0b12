//! Version command

use crate::cli::VersionArgs;
use anyhow::Result;
use serde::Serialize;
use std::fmt;

/// Build information baked in by build.rs
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub version: String,
    pub commit: Option<String>,
    pub build_date: Option<String>,
    pub target: Option<String>,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            commit: option_env!("GIT_SHA").map(String::from),
            build_date: option_env!("BUILD_DATE").map(String::from),
            target: option_env!("TARGET").map(String::from),
        }
    }

    /// Labelled detail rows for the fields that are known
    fn details(&self) -> Vec<(&'static str, &str)> {
        [
            ("Commit", self.commit.as_deref()),
            ("Build date", self.build_date.as_deref()),
            ("Target", self.target.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.map(|v| (label, v)))
        .collect()
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stencil {}", self.version)?;
        if let Some(commit) = &self.commit {
            write!(f, " ({})", commit)?;
        }
        Ok(())
    }
}

pub fn run(args: VersionArgs) -> Result<()> {
    let info = BuildInfo::current();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{}", info);
    for (label, value) in info.details() {
        println!("{:<11} {}", format!("{}:", label), value);
    }

    Ok(())
}
