//! unitdrill CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "unitdrill", version, about = "Timed unit-conversion quiz")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a timed practice session
    Practice {
        /// Session length in seconds (10-600; invalid values mean 60)
        #[arg(long)]
        duration: Option<String>,

        /// Player name for reports and score submission
        #[arg(long)]
        name: Option<String>,

        /// Seed for a reproducible problem sequence
        #[arg(long)]
        seed: Option<u64>,

        /// Catalog file or directory to use instead of the built-in units
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output directory for reports
        #[arg(long)]
        output: Option<PathBuf>,

        /// Report formats: json, html, all, none
        #[arg(long, default_value = "none")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print one worked conversion example
    Example {
        /// Explain this conversion instead of a random one (e.g. "Convert 3 ft to in")
        #[arg(long)]
        question: Option<String>,

        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Print generated problems with their options
    Generate {
        /// Number of problems
        #[arg(long, default_value = "5")]
        count: usize,

        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Print the unit conversion reference
    Units {
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Validate catalog TOML files
    Validate {
        /// Path to catalog file or directory
        #[arg(long)]
        catalog: PathBuf,
    },

    /// Create starter config and example catalog
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("unitdrill=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Practice {
            duration,
            name,
            seed,
            catalog,
            output,
            format,
            config,
        } => {
            commands::practice::execute(duration, name, seed, catalog, output, format, config)
                .await
        }
        Commands::Example {
            question,
            seed,
            catalog,
        } => commands::example::execute(question, seed, catalog),
        Commands::Generate {
            count,
            seed,
            catalog,
            format,
        } => commands::generate::execute(count, seed, catalog, format),
        Commands::Units { catalog } => commands::units::execute(catalog),
        Commands::Validate { catalog } => commands::validate::execute(catalog),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
