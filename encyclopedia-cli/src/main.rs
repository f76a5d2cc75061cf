//! # encyclopedia CLI
//!
//! Command-line interface and web server for the encyclopedia wiki.

mod commands;
mod server;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "encyclopedia")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(
        long,
        env = "ENCYCLOPEDIA_CONFIG",
        default_value = "encyclopedia.yml",
        global = true
    )]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new encyclopedia with starter entries
    Init {
        /// Target directory (defaults to current directory)
        path: Option<PathBuf>,
    },

    /// Serve the wiki over HTTP
    Serve {
        /// Address to bind (overrides server.host)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides server.port)
        #[arg(long)]
        port: Option<u16>,
    },

    /// List every entry title
    List,

    /// Print a single entry
    Show {
        /// Exact entry title
        title: String,

        /// Print rendered HTML instead of Markdown
        #[arg(long)]
        html: bool,
    },

    /// Search entry titles
    Search {
        /// Search query
        query: String,

        /// Return JSON for machine consumption
        #[arg(long)]
        json: bool,
    },

    /// Print a randomly chosen entry title
    Random,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so command output stays clean on stdout
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
        Commands::Init { path } => commands::init_project(path.as_deref()),
        Commands::Serve { host, port } => {
            let opts = commands::ServeOptions { host, port };
            commands::serve(&cli.config, opts).await
        }
        Commands::List => commands::list_entries(&cli.config),
        Commands::Show { title, html } => commands::show_entry(&cli.config, &title, html),
        Commands::Search { query, json } => commands::search_entries(&cli.config, &query, json),
        Commands::Random => commands::random_entry(&cli.config),
    }
}
