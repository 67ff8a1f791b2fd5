use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "policyscout")]
#[command(about = "Privacy-policy discovery for arbitrary websites")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the full discovery pipeline against one domain.
    Discover {
        domain: String,
        /// Print only the discovered URL (or nothing), no diagnostics.
        #[arg(long)]
        simple: bool,
    },
    /// Run discovery over many domains with bounded concurrency.
    Batch {
        /// Domains to process; use `--file` to read them from a file instead.
        domains: Vec<String>,
        /// File with one domain per line; `#` starts a comment.
        #[arg(long)]
        file: Option<std::path::PathBuf>,
    },
    /// Fetch and clean the full text of a chosen policy URL.
    Scrape { url: String },
    /// Single-page scan categorizing a site's outbound links.
    Pages { domain: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = policyscout_core::load_app_config_from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let cli = Cli::parse();
    let discovery = policyscout_scraper::Discovery::from_config(&config)?;

    match cli.command {
        Commands::Discover { domain, simple } => {
            commands::run_discover(&discovery, &domain, simple).await
        }
        Commands::Batch { domains, file } => {
            commands::run_batch(&discovery, domains, file.as_deref()).await
        }
        Commands::Scrape { url } => commands::run_scrape(&discovery, &url).await,
        Commands::Pages { domain } => commands::run_pages(&discovery, &domain).await,
    }
}
