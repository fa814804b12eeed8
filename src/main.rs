use anyhow::Result;
use clap::{Parser, Subcommand};

/// freshkeep - household food inventory with expiry tracking
#[derive(Parser)]
#[command(name = "freshkeep")]
#[command(about = "Track what is in the fridge and get told before it goes off", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Run one notification sweep over every user and exit
    Notify {
        /// Also create weekly summaries
        #[arg(long)]
        weekly: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = freshkeep::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    freshkeep::observability::init_observability(
        "freshkeep",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
        config.observability.json,
    )?;

    match cli.command {
        Commands::Serve { host, port } => freshkeep::cli::serve(config, host, port).await,
        Commands::Migrate => freshkeep::cli::migrate(config).await,
        Commands::Reset => freshkeep::cli::reset(config).await,
        Commands::Notify { weekly } => freshkeep::cli::notify(config, weekly).await,
    }
}
