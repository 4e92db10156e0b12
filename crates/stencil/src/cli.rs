//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// Stencil - maintenance toolbox for project-template repositories
#[derive(Parser, Debug)]
#[command(name = "stencil")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to stencil.yaml config file
    #[arg(short, long, global = true)]
    pub config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute an Adler-32 checksum of all Git-tracked files in a folder
    HashFiles(HashFilesArgs),

    /// Show version information
    Version(VersionArgs),

    /// Inspect or render the version-pin context
    #[command(subcommand)]
    Context(ContextCommands),

    /// Print the project version, check its tag, or push the tag
    Release(ReleaseArgs),

    /// Point pyproject.toml files with a private default index at public PyPI
    UsePublicRegistries(RegistriesArgs),

    /// Install uv, copier, pre-commit and pnpm at pinned versions
    InstallCiTooling(InstallCiToolingArgs),

    /// Install dependencies for every environment in .devcontainer/envs.json
    SyncDeps(SyncDepsArgs),
}

// Hash command
#[derive(Args, Debug)]
pub struct HashFilesArgs {
    /// Path to the Git repository folder
    pub folder: Utf8PathBuf,

    /// Print all discovered Git-tracked files
    #[arg(long)]
    pub debug: bool,

    /// Update the hash in the devcontainer config from the devcontainer context files only
    #[arg(long)]
    pub for_devcontainer_config_update: bool,

    /// Exit with code 0 even if the hash changes
    #[arg(long)]
    pub exit_zero: bool,
}

// Version command
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Context commands
#[derive(Subcommand, Debug)]
pub enum ContextCommands {
    /// Show resolved version pins
    Show(ContextShowArgs),

    /// Render a template file with the version pins
    Render(ContextRenderArgs),
}

#[derive(Args, Debug)]
pub struct ContextShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Override a pin (key=value, repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ContextRenderArgs {
    /// Template file to render
    pub template: Utf8PathBuf,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<Utf8PathBuf>,

    /// Override a pin (key=value, repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,
}

// Release command
#[derive(Args, Debug)]
pub struct ReleaseArgs {
    /// Path to pyproject.toml (default: release.manifest from config)
    pub file: Option<Utf8PathBuf>,

    /// Fail if the version tag is already present on the remote
    #[arg(long)]
    pub confirm_tag_not_present: bool,

    /// Create the version tag locally and push it to the remote
    #[arg(long)]
    pub push_tag_to_remote: bool,

    /// Git remote to query/push (default: release.remote from config)
    #[arg(long)]
    pub remote: Option<String>,
}

// Registry rewrite command
#[derive(Args, Debug)]
pub struct RegistriesArgs {
    /// Directory to search for pyproject.toml files
    #[arg(long, default_value = ".")]
    pub root: Utf8PathBuf,
}

// CI tooling command
#[derive(Args, Debug)]
pub struct InstallCiToolingArgs {
    /// Do not install Python tooling
    #[arg(long)]
    pub no_python: bool,

    /// Do not install Node tooling
    #[arg(long)]
    pub no_node: bool,

    /// Python version uv should use
    #[arg(long)]
    pub python_version: Option<String>,

    /// Print the commands instead of running them
    #[arg(long)]
    pub dry_run: bool,
}

// Dependency sync command
#[derive(Args, Debug)]
pub struct SyncDepsArgs {
    /// Repository root (default: current directory)
    #[arg(long)]
    pub repo_root: Option<Utf8PathBuf>,

    /// Python version uv should use
    #[arg(long)]
    pub python_version: Option<String>,

    /// Skip the lock file check step
    #[arg(long)]
    pub skip_check_lock: bool,

    /// Check the lock file only if it exists
    #[arg(long)]
    pub optionally_check_lock: bool,

    /// Do not process environments using Python package managers
    #[arg(long)]
    pub no_python: bool,

    /// Do not process environments using Node package managers
    #[arg(long)]
    pub no_node: bool,

    /// Print the commands instead of running them
    #[arg(long)]
    pub dry_run: bool,
}
