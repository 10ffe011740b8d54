// shadowmod/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shadowmod")]
#[command(
    about = "Builds generated packages against their unpublished local siblings",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v: debug, -vv: trace). RUST_LOG wins when set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct PackageArgs {
    /// Generated package directory (contains the manifest)
    #[arg(long, default_value = ".")]
    pub package_dir: PathBuf,

    /// Directory holding shadowmod.yaml (defaults to the package directory)
    #[arg(long)]
    pub project_dir: Option<PathBuf>,
}

impl PackageArgs {
    pub fn project_dir(&self) -> PathBuf {
        self.project_dir
            .clone()
            .unwrap_or_else(|| self.package_dir.clone())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🔨 Verifies the package with local overrides (download -> build -> cleanup)
    Build {
        #[command(flatten)]
        package: PackageArgs,
    },

    /// 🔎 Shows which dependencies would be replaced by local builds
    Resolve {
        #[command(flatten)]
        package: PackageArgs,

        /// Print the override map as JSON
        #[arg(long)]
        json: bool,
    },

    /// 🧹 Removes shadow artifacts left by a failed build
    Clean {
        #[command(flatten)]
        package: PackageArgs,
    },
}
