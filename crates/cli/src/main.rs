use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "homeroom", about = "Roster to MDM class synchronizer", version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "homeroom.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Initialize Homeroom data directory and configuration
    Init {
        /// Data directory path
        #[arg(long, default_value = "/var/lib/homeroom")]
        data_dir: String,
    },
    /// Sync roster classes to the MDM
    Sync {
        /// Preview changes without applying
        #[arg(long)]
        dry_run: bool,
        /// Pull the full roster, ignoring the last-sync watermark
        #[arg(long)]
        full: bool,
    },
    /// Show configuration and last-sync status
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { data_dir } => {
            commands::init::run(&data_dir).await?;
        }
        Commands::Sync { dry_run, full } => {
            commands::sync::run(&cli.config, dry_run, full).await?;
        }
        Commands::Status => {
            commands::status::run(&cli.config).await?;
        }
    }

    Ok(())
}
