mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use stratum_migrate::MigrateError;
use tracing_subscriber::EnvFilter;

use commands::{apply, list, run};

#[derive(Parser)]
#[command(name = "stratum")]
#[command(about = "PostgreSQL schema migration runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply every migration in the migrations directory
    Run {
        /// Directory containing .sql migration files
        #[arg(long, default_value = "migrations")]
        dir: PathBuf,

        /// Fall back to local development defaults for absent DB_* variables
        #[arg(long)]
        local: bool,
    },

    /// Apply a single named migration file
    Apply {
        /// Path to the .sql file to apply
        file: PathBuf,

        /// Fall back to local development defaults for absent DB_* variables
        #[arg(long)]
        local: bool,
    },

    /// Show the validated execution plan without touching the database
    List {
        /// Directory containing .sql migration files
        #[arg(long, default_value = "migrations")]
        dir: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(err) = dispatch(cli).await {
        eprintln!("❌ {}", err);
        process::exit(1);
    }
}

async fn dispatch(cli: Cli) -> Result<(), MigrateError> {
    match cli.command {
        Commands::Run { dir, local } => run::run(&dir, local).await,
        Commands::Apply { file, local } => apply::apply(&file, local).await,
        Commands::List { dir, json } => list::list(&dir, json).await,
    }
}
