use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::SignalConfig;
use crate::gateways::{IndexChange, MarketDataGateway};

#[derive(Debug, Clone)]
pub struct SentimentReading {
    /// Sum of per-index percent changes. Sign carries the bias; magnitude is
    /// unbounded.
    pub score: f64,
    pub changes: Vec<IndexChange>,
}

/// Folds the reference-index basket into one scalar sentiment score.
pub struct SentimentAggregator {
    config: SignalConfig,
    market_data: Arc<dyn MarketDataGateway>,
}

impl SentimentAggregator {
    pub fn new(config: SignalConfig, market_data: Arc<dyn MarketDataGateway>) -> Self {
        Self {
            config,
            market_data,
        }
    }

    /// One blocking fetch per basket ticker, in order. A ticker whose series
    /// comes back empty or single-pointed contributes 0 rather than sinking
    /// the whole reading.
    pub async fn score(&self) -> SentimentReading {
        let mut changes = Vec::with_capacity(self.config.sentiment_basket.len());
        let mut score = 0.0;

        for ticker in &self.config.sentiment_basket {
            let series = self
                .market_data
                .fetch(ticker, self.config.lookback_days)
                .await;

            if series.bars.len() < 2 {
                warn!("⚠️ {}: not enough data, contributes 0", ticker);
                changes.push(IndexChange {
                    ticker: ticker.clone(),
                    percent_change: 0.0,
                });
                continue;
            }

            let pct = series.percent_change();
            debug!("📊 {}: {:+.2}%", ticker, pct);
            score += pct;
            changes.push(IndexChange {
                ticker: ticker.clone(),
                percent_change: pct,
            });
        }

        SentimentReading { score, changes }
    }
}
