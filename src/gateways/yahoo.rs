use chrono::{TimeZone, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use super::api::MarketDataGateway;
use super::types::{PriceBar, PriceSeries};
use async_trait::async_trait;

const DEFAULT_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Market-data gateway backed by the Yahoo Finance v8 chart endpoint.
pub struct YahooClient {
    http_client: reqwest::Client,
    base_url: String,
}

#[async_trait]
impl MarketDataGateway for YahooClient {
    async fn fetch(&self, ticker: &str, lookback_days: u32) -> PriceSeries {
        let url = format!(
            "{}/{}?range={}d&interval=1d",
            self.base_url, ticker, lookback_days
        );

        let response = match self.http_client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("⚠️ Market data request failed for {}: {}", ticker, e);
                return PriceSeries::empty(ticker);
            }
        };

        if !response.status().is_success() {
            warn!(
                "⚠️ Market data provider returned {} for {}",
                response.status(),
                ticker
            );
            return PriceSeries::empty(ticker);
        }

        let payload: ChartResponse = match response.json().await {
            Ok(p) => p,
            Err(e) => {
                warn!("⚠️ Could not decode chart payload for {}: {}", ticker, e);
                return PriceSeries::empty(ticker);
            }
        };

        let series = Self::convert_chart(ticker, &payload);
        debug!("📉 {}: {} bars fetched", ticker, series.bars.len());
        series
    }
}

impl YahooClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_CHART_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .user_agent("Mozilla/5.0 (X11; Linux x86_64)")
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Convert the chart payload to a PriceSeries, dropping points where the
    /// provider published a null open or close.
    fn convert_chart(ticker: &str, payload: &ChartResponse) -> PriceSeries {
        let result = match payload.chart.result.as_ref().and_then(|r| r.first()) {
            Some(r) => r,
            None => return PriceSeries::empty(ticker),
        };

        let quote = match result.indicators.quote.first() {
            Some(q) => q,
            None => return PriceSeries::empty(ticker),
        };

        let mut bars = Vec::with_capacity(result.timestamp.len());
        for (i, ts) in result.timestamp.iter().enumerate() {
            let open = quote.open.get(i).copied().flatten();
            let close = quote.close.get(i).copied().flatten();
            if let (Some(open), Some(close)) = (open, close) {
                if let Some(timestamp) = Utc.timestamp_opt(*ts, 0).single() {
                    bars.push(PriceBar {
                        timestamp,
                        open,
                        close,
                    });
                }
            }
        }

        PriceSeries {
            ticker: ticker.to_string(),
            bars,
        }
    }
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

// Wire format of the v8 chart endpoint. Quote arrays carry nulls for
// sessions without a trade, hence Option per point.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
}
