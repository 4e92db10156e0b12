//! CI tooling installer command

use crate::cli::InstallCiToolingArgs;
use anyhow::Result;
use camino::Utf8Path;
use stencil_core::VersionContext;
use stencil_tooling::{plan_ci_tooling, run_all, CiToolingOptions, SystemRunner};

use super::load_config;
use crate::output;

pub fn run(args: InstallCiToolingArgs, config: Option<&Utf8Path>) -> Result<()> {
    let config = load_config(config)?;
    let pins = VersionContext::resolve(&config)?;

    let options = CiToolingOptions {
        python: !args.no_python,
        node: !args.no_node,
        python_version: args.python_version,
    };
    let plan = plan_ci_tooling(&pins, &config.tooling.uv_install_url, &options)?;

    if args.dry_run {
        output::header("Planned commands");
        for spec in &plan {
            output::planned(spec);
        }
        return Ok(());
    }

    run_all(&SystemRunner, &plan)?;
    output::success("CI tooling installed");
    Ok(())
}
