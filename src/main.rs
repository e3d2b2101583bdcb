use anyhow::Result;
use skysense::{SkySenseConfig, VERSION, logging, web};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = SkySenseConfig::load()?;
    logging::init_tracing(&config.logging)?;

    info!("SkySense {} starting", VERSION);
    info!("API key loaded: {}", config.api_key_hint());
    info!(
        "Upstream: {}, default city: {}, roster: {}",
        config.upstream.base_url,
        config.dashboard.default_city,
        config.dashboard.roster.join(", ")
    );
    match &config.server.client_url {
        Some(origin) => info!("CORS origin: {}", origin),
        None => info!("CORS origin: any"),
    }

    web::run(&config).await
}
