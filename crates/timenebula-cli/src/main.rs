use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "timenebula", version, about = "TimeNebula CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Work session control and settlement
    Work {
        #[command(subcommand)]
        action: commands::work::WorkAction,
    },
    /// Claimed hour chunks and session history
    Vault {
        #[command(subcommand)]
        action: commands::vault::VaultAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("TIMENEBULA_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Work { action } => commands::work::run(action),
        Commands::Vault { action } => commands::vault::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
