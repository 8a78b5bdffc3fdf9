use anyhow::Result;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};
use shipping_label_bridge::{
    server,
    aramex::AramexClient,
    config::Config,
    routes::{AppState, create_router},
    shopify::ShopifyClient,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let state = AppState::new(
        Arc::new(ShopifyClient::new(&config)?),
        Arc::new(AramexClient::new(&config)?),
    );

    server::serve(&config, create_router(state)).await
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("shipping_label_bridge=debug,tower_http=info,info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .init();
}
