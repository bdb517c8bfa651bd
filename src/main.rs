use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tastemap::commands;

#[derive(Parser)]
#[command(
    name = "tastemap",
    version,
    about = "Travel venue discovery: bilingual article scraping cross-validated against Google Places",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the discovery pipeline once and save the results
    Search {
        /// Search query (e.g. "東京好吃的拉麵")
        query: String,

        /// Number of results per page
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Page number (1-based)
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Append to stored results instead of replacing them
        #[arg(long, default_value = "false")]
        append: bool,
    },

    /// Show the facet breakdown for a query without searching
    Parse {
        /// Query to parse
        query: String,
    },

    /// Start the HTTP API server
    Serve {
        /// Bind host (overrides TASTEMAP_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides TASTEMAP_PORT)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(&cli.log_format, cli.verbose)?;

    match cli.command {
        Commands::Search {
            query,
            limit,
            page,
            append,
        } => {
            tracing::info!(
                query = %query,
                limit = %limit,
                page = %page,
                append = %append,
                "Starting search command"
            );
            commands::search(query, limit, page, append).await?;
        }

        Commands::Parse { query } => {
            commands::parse(query)?;
        }

        Commands::Serve { host, port } => {
            tracing::info!(host = ?host, port = ?port, "Starting serve command");
            commands::serve(host, port).await?;
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("tastemap=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("tastemap=info,warn")
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}
