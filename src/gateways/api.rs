use async_trait::async_trait;
use thiserror::Error;

use super::types::{ChainSnapshot, PriceSeries};

#[derive(Debug, Error)]
pub enum ChainError {
    /// Provider could not be reached or answered badly. Recoverable: the run
    /// degrades to a neutral outcome.
    #[error("option chain unavailable: {0}")]
    Unavailable(String),
    /// Provider answered but the body is not a chain payload. This is the one
    /// error that aborts the run.
    #[error("option chain response unparseable: {0}")]
    Unparseable(String),
}

#[async_trait]
pub trait MarketDataGateway: Send + Sync {
    /// Fetch daily bars for `ticker` over the last `lookback_days`.
    /// Never fails: an unreachable provider or unknown ticker yields an
    /// empty series.
    async fn fetch(&self, ticker: &str, lookback_days: u32) -> PriceSeries;
}

#[async_trait]
pub trait OptionChainGateway: Send + Sync {
    /// Fetch the current chain snapshot for an index (e.g. "BANKNIFTY").
    async fn fetch(&self, index: &str) -> Result<ChainSnapshot, ChainError>;
}
