//! Public registry rewrite command

use crate::cli::RegistriesArgs;
use anyhow::{Context, Result};
use stencil_release::{find_pyproject_files, process_file, RegistryRewrite};

use crate::output;

pub fn run(args: RegistriesArgs) -> Result<()> {
    let files = find_pyproject_files(&args.root);
    if files.is_empty() {
        output::warning(format!("No pyproject.toml files found under {}", args.root));
        return Ok(());
    }

    for file in files {
        let result = process_file(&file).with_context(|| format!("Failed to process {}", file))?;
        match result {
            RegistryRewrite::Updated => println!("Updated file: {}", file),
            RegistryRewrite::Unchanged => println!("No changes in: {}", file),
        }
    }

    Ok(())
}
