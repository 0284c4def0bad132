//! CLI application for converting distributor invoice PDFs into GL-coded rows.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, convert};

/// Invoice mapper - Turn distributor invoice statements into GL-coded import rows
#[derive(Parser)]
#[command(name = "invmap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a folder of invoice PDFs into rows
    Convert(convert::ConvertArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn init_logging(verbose: u8, floor: Level) -> anyhow::Result<()> {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // More verbose levels compare greater.
    let level = level.max(floor);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert(args) => {
            let config = config::load(cli.config.as_deref())?;
            let floor = if config.verbose { Level::INFO } else { Level::WARN };
            init_logging(cli.verbose, floor)?;
            convert::run(args, config)
        }
        Commands::Config(args) => {
            init_logging(cli.verbose, Level::WARN)?;
            config::run(args, cli.config.as_deref())
        }
    }
}
