use std::sync::Arc;

use clap::Parser;
use clap::Subcommand;
use stylerag::catalog::CatalogIngestor;
use stylerag::config::AppConfig;
use stylerag::embeddings::EmbeddingService;
use stylerag::index::VectorIndexClient;
use stylerag::reco::AppRecoService;
use tracing::info;

#[derive(Parser)]
#[command(name = "stylerag")]
#[command(about = "StyleRAG CLI for serving and catalog ingestion")]
#[command(version)]
struct Cli {
    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the recommendation API server
    Serve {
        /// Host address to bind
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,
        /// Enable permissive CORS
        #[arg(long)]
        cors: bool,
    },
    /// Run one query through the pipeline from the terminal
    Recommend {
        /// The shopping query
        query: String,
    },
    /// Ingest a catalog CSV into the vector index
    Ingest {
        /// Path to the catalog CSV file
        path: String,
    },
    /// Write a default config.toml
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Init { force } = &cli.command {
        return init_config(*force);
    }

    let config = AppConfig::load()?;

    if cli.verbose {
        stylerag::logging::init_logging_with_level("debug")?;
    } else {
        stylerag::logging::init_logging_with_config(Some(&config))?;
    }

    match cli.command {
        Commands::Serve { host, port, cors } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            stylerag::api::serve_api(&config, host, port, cors).await?;
        }
        Commands::Recommend { query } => {
            let service = AppRecoService::new(&config)?;
            let response = service.recommend(&query).await?;
            println!("{}", response.recommendation_text);
            println!();
            for product in &response.products {
                println!(
                    "- {} [{}] {}",
                    product.name,
                    product.category,
                    product.url.as_deref().unwrap_or("(no link found)")
                );
            }
        }
        Commands::Ingest { path } => {
            let embedding_service = Arc::new(EmbeddingService::new(&config)?);
            let index = Arc::new(VectorIndexClient::new(&config)?);
            let ingestor = CatalogIngestor::new(embedding_service, index);
            let count = ingestor.ingest_csv(&path).await?;
            info!("Ingested {} catalog items from {}", count, path);
        }
        Commands::Init { .. } => unreachable!(),
    }

    Ok(())
}

fn init_config(force: bool) -> anyhow::Result<()> {
    let path = std::path::Path::new("config.toml");
    if path.exists() && !force {
        anyhow::bail!("config.toml already exists (use --force to overwrite)");
    }
    let config = AppConfig::default();
    std::fs::write(path, toml::to_string_pretty(&config)?)?;
    println!("Wrote default configuration to config.toml");
    Ok(())
}
