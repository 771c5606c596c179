use axum::Extension;
use clap::Parser;
use config::Config;
use tower_http::trace::TraceLayer;
use tracing_subscriber::prelude::*;

mod cache;
mod config;
mod errors;
mod github;
mod resolve;
mod routes;
mod tree;
mod utils;

#[derive(clap::Parser)]
struct Cli {
    /// Path to the configuration file
    #[clap(long, default_value = "gitview.toml")]
    config: std::path::PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::filter::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "debug,hyper=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = config::load(&cli.config)?;
    run_server(config).await
}

async fn run_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let client = github::Client::new(&config.github)?;

    let app = routes::build_router()
        .layer(TraceLayer::new_for_http())
        .layer(Extension(client))
        .layer(Extension(cache::ListingCache::default()));

    axum::Server::bind(&config.server.address.parse()?)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
