//! # tinyweb CLI
//!
//! Command-line interface for the tinyweb content site.

mod api;
mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tinyweb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "tinyweb.yml", env = "TINYWEB_CONFIG")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new tinyweb site
    Init {
        /// Target directory (defaults to current directory)
        path: Option<PathBuf>,
    },

    /// Render the site into the output directory
    Build,

    /// Serve the site, reading content fresh on every request
    Serve {
        /// Server port (defaults to server.port from the config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// List documentation grouped by category, or search titles
    Docs {
        /// Case-insensitive title search
        #[arg(long, short)]
        search: Option<String>,

        /// Return JSON for machine consumption
        #[arg(long)]
        json: bool,
    },

    /// List projects with their extracted titles and descriptions
    Projects {
        /// Return JSON for machine consumption
        #[arg(long)]
        json: bool,
    },

    /// Show the homepage counts
    Stats {
        /// Return JSON for machine consumption
        #[arg(long)]
        json: bool,
    },

    /// Inspect configuration values
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print a value by dotted key (e.g. site.title, server.port)
    Get {
        /// Dotted key
        key: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Init { path } => commands::init_site(path.as_deref()),
        Commands::Build => commands::build_site(&cli.config).await.map(|_| ()),
        Commands::Serve { port } => commands::serve(&cli.config, port).await,
        Commands::Docs { search, json } => {
            commands::list_docs(&cli.config, search.as_deref(), json).await
        }
        Commands::Projects { json } => commands::list_projects(&cli.config, json),
        Commands::Stats { json } => commands::show_stats(&cli.config, json),
        Commands::Config {
            command: ConfigCommands::Get { key },
        } => commands::config_get(&cli.config, &key),
    }
}
