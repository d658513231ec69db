use anyhow::Result;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use banknifty_options_agent::agent::Agent;
use banknifty_options_agent::config::Config;
use banknifty_options_agent::gateways::{NseClient, YahooClient};
use banknifty_options_agent::report;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "banknifty_options_agent=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    report::print_banner(&config);

    let market_data = Arc::new(YahooClient::new());
    let chain_gateway = Arc::new(NseClient::new());

    let agent = Agent::new(config, market_data, chain_gateway);

    // One evaluation per invocation, then exit.
    agent.run().await
}
