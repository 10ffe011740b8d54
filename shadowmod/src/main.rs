// shadowmod/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug shadowmod build ... to see every probe
    init_tracing(cli.verbose);

    match cli.command {
        // --- USE CASE: VERIFY PACKAGE ---
        Commands::Build { package } => {
            commands::build::execute(package.package_dir.clone(), package.project_dir()).await?
        }

        // --- USE CASE: DRY RUN ---
        Commands::Resolve { package, json } => {
            commands::resolve::execute(package.package_dir.clone(), package.project_dir(), json)?
        }

        // --- USE CASE: CLEAN ---
        Commands::Clean { package } => {
            commands::clean::execute(package.package_dir.clone(), package.project_dir())?
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
