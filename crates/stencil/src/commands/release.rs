//! Release tag command

use crate::cli::ReleaseArgs;
use anyhow::Result;
use camino::{Utf8Path, Utf8PathBuf};
use stencil_release::extract_version;
use stencil_release::git::{tag_name, TagRemote};

use super::load_config;
use crate::output;

pub fn run(args: ReleaseArgs, config: Option<&Utf8Path>) -> Result<()> {
    let config = load_config(config)?;

    let manifest = args
        .file
        .unwrap_or_else(|| Utf8PathBuf::from(&config.release.manifest));
    let remote_name = args.remote.unwrap_or(config.release.remote);

    let version = extract_version(&manifest)?;
    let tag = tag_name(&config.release.tag_prefix, &version);
    let remote = TagRemote::new(remote_name);

    if args.push_tag_to_remote {
        remote.create_and_push(&tag)?;
        output::success(format!("Pushed tag {} to {}", tag, remote.remote()));
        return Ok(());
    }

    if args.confirm_tag_not_present {
        remote.ensure_tag_not_present(&tag)?;
        output::success(format!(
            "Tag {} is not present on {}",
            tag,
            remote.remote()
        ));
        return Ok(());
    }

    // Bare version on stdout for CI pipelines
    println!("{}", version);
    Ok(())
}
