//! CI tooling installation plan
//!
//! uv comes from its install script; copier and pre-commit are installed as
//! uv tools. Node tooling is pnpm installed through npm. All versions are read
//! from the version-pin context.

use crate::error::Result;
use crate::process::CommandSpec;
use std::collections::BTreeMap;
use stencil_core::VersionContext;

/// Which toolchains to install
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CiToolingOptions {
    pub python: bool,
    pub node: bool,
    /// Exported as `UV_PYTHON` when set
    pub python_version: Option<String>,
}

impl CiToolingOptions {
    pub fn all() -> Self {
        Self {
            python: true,
            node: true,
            python_version: None,
        }
    }
}

/// Environment every uv invocation runs with
pub fn uv_environment(python_version: Option<&str>) -> BTreeMap<String, String> {
    let mut env = BTreeMap::new();
    env.insert("UV_PYTHON_PREFERENCE".to_string(), "only-system".to_string());
    if let Some(version) = python_version {
        env.insert("UV_PYTHON".to_string(), version.to_string());
    }
    env
}

/// Build the ordered install commands
///
/// `uv_install_url` may contain `{version}`, replaced by the `uv_version` pin.
pub fn plan_ci_tooling(
    pins: &VersionContext,
    uv_install_url: &str,
    options: &CiToolingOptions,
) -> Result<Vec<CommandSpec>> {
    let mut plan = Vec::new();

    if options.python {
        let uv_env = uv_environment(options.python_version.as_deref());
        let install_url = uv_install_url.replace("{version}", pins.require_str("uv_version")?);

        plan.push(CommandSpec::shell(format!("curl -fsSL {install_url} | sh")).envs(&uv_env));
        plan.push(
            CommandSpec::new("uv")
                .args(["tool", "install"])
                .arg(format!("copier=={}", pins.require_str("copier_version")?))
                .arg("--with")
                .arg(format!(
                    "copier-templates-extensions=={}",
                    pins.require_str("copier_template_extensions_version")?
                ))
                .envs(&uv_env),
        );
        plan.push(
            CommandSpec::new("uv")
                .args(["tool", "install"])
                .arg(format!("pre-commit=={}", pins.require_str("pre_commit_version")?))
                .envs(&uv_env),
        );
        plan.push(CommandSpec::new("uv").args(["tool", "list"]).envs(&uv_env));
    }

    if options.node {
        plan.push(CommandSpec::new("npm").arg("-v"));
        plan.push(
            CommandSpec::new("npm")
                .args(["install", "-g"])
                .arg(format!("pnpm@{}", pins.require_str("pnpm_version")?)),
        );
        plan.push(CommandSpec::new("pnpm").arg("-v"));
    }

    Ok(plan)
}
