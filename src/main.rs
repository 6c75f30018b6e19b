mod app;
mod config;
mod events;
mod jobs;
mod provider;
mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::Config;
use std::fs;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rolearc")]
#[command(version = "0.1.0")]
#[command(about = "Job discovery with a floating assistant", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the seeded job records
    Jobs,
    /// Show where configuration is stored
    Config,
}

fn list_jobs() {
    let jobs = jobs::sample_jobs();

    println!("📋 Roles on the board:\n");
    for job in jobs {
        println!("  • {} — {}", job.title, job.company);
        println!(
            "    📍 {}  💼 {}  💰 {}  {} {}",
            job.location,
            job.employment_type,
            job.salary,
            job.work_location.icon(),
            job.work_location.display_name()
        );
    }
}

/// Send tracing output to a file under the RoleArc home so the TUI stays
/// clean. Controlled by RUST_LOG.
fn init_tracing(config: &Config) -> Result<()> {
    fs::create_dir_all(&config.rolearc_home)
        .context("Failed to create .rolearc directory")?;
    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_path())
        .context("Failed to open log file")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    init_tracing(&config)?;

    match cli.command {
        None => app::run(config).await,
        Some(Commands::Jobs) => {
            list_jobs();
            Ok(())
        }
        Some(Commands::Config) => {
            println!("🛠  Config file: {}", config.config_path().display());
            println!("🪵 Log file:    {}", config.log_path().display());
            Ok(())
        }
    }
}
