use serde::Deserialize;
use tracing::{debug, info, warn};

use super::api::{ChainError, OptionChainGateway};
use super::types::{ChainSnapshot, OptionLeg, StrikeRecord};
use async_trait::async_trait;

const DEFAULT_BASE_URL: &str = "https://www.nseindia.com";
const CHAIN_PATH: &str = "/api/option-chain-indices";

/// Option-chain gateway backed by the NSE public chain endpoint.
///
/// NSE rejects cookie-less API hits, so every fetch warms up a session
/// against the homepage first and relies on the client's cookie store.
pub struct NseClient {
    http_client: reqwest::Client,
    base_url: String,
}

#[async_trait]
impl OptionChainGateway for NseClient {
    async fn fetch(&self, index: &str) -> Result<ChainSnapshot, ChainError> {
        self.warm_up().await;

        let url = format!("{}{}?symbol={}", self.base_url, CHAIN_PATH, index);
        let response = self
            .http_client
            .get(&url)
            .header("Accept", "application/json")
            .header("Referer", format!("{}/option-chain", self.base_url))
            .send()
            .await
            .map_err(|e| ChainError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ChainError::Unavailable(format!(
                "chain endpoint returned {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ChainError::Unavailable(e.to_string()))?;

        // From here on the provider has answered; a body we cannot decode is
        // the unrecoverable case.
        let payload: ChainPayload = serde_json::from_str(&body)
            .map_err(|e| ChainError::Unparseable(e.to_string()))?;

        let snapshot = Self::convert_chain(&payload);
        info!(
            "🔗 {} chain: {} strikes, {} expiries, underlying {:.2}",
            index,
            snapshot.strikes.len(),
            snapshot.expiry_dates.len(),
            snapshot.underlying_value
        );
        Ok(snapshot)
    }
}

impl NseClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .cookie_store(true)
            .user_agent("Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36")
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Session-cookie warm-up. Failure here is not fatal; the chain request
    /// itself will report the real problem.
    async fn warm_up(&self) {
        match self.http_client.get(&self.base_url).send().await {
            Ok(r) => debug!("🍪 NSE warm-up status {}", r.status()),
            Err(e) => warn!("⚠️ NSE warm-up failed: {}", e),
        }
    }

    fn convert_chain(payload: &ChainPayload) -> ChainSnapshot {
        let strikes = payload
            .records
            .data
            .iter()
            .map(|row| StrikeRecord {
                strike_price: row.strike_price,
                call: row.ce.as_ref().map(LegRow::to_leg),
                put: row.pe.as_ref().map(LegRow::to_leg),
            })
            .collect();

        ChainSnapshot {
            underlying_value: payload.records.underlying_value,
            total_call_oi: payload.filtered.as_ref().and_then(|f| f.ce.as_ref()).map(|t| t.tot_oi),
            total_put_oi: payload.filtered.as_ref().and_then(|f| f.pe.as_ref()).map(|t| t.tot_oi),
            expiry_dates: payload.records.expiry_dates.clone(),
            strikes,
        }
    }
}

impl Default for NseClient {
    fn default() -> Self {
        Self::new()
    }
}

// Wire format of /api/option-chain-indices.
#[derive(Debug, Deserialize)]
struct ChainPayload {
    records: Records,
    filtered: Option<Filtered>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Records {
    #[serde(default)]
    expiry_dates: Vec<String>,
    #[serde(default)]
    data: Vec<StrikeRow>,
    #[serde(default)]
    underlying_value: f64,
}

#[derive(Debug, Deserialize)]
struct Filtered {
    #[serde(rename = "CE")]
    ce: Option<SideTotals>,
    #[serde(rename = "PE")]
    pe: Option<SideTotals>,
}

#[derive(Debug, Deserialize)]
struct SideTotals {
    #[serde(rename = "totOI", default)]
    tot_oi: f64,
}

#[derive(Debug, Deserialize)]
struct StrikeRow {
    #[serde(rename = "strikePrice", default)]
    strike_price: f64,
    #[serde(rename = "CE")]
    ce: Option<LegRow>,
    #[serde(rename = "PE")]
    pe: Option<LegRow>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegRow {
    #[serde(default)]
    open_interest: f64,
    #[serde(default)]
    last_price: f64,
}

impl LegRow {
    fn to_leg(&self) -> OptionLeg {
        OptionLeg {
            open_interest: self.open_interest,
            last_price: self.last_price,
        }
    }
}
