use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub close: f64,
}

/// Chronological closing-price history for one ticker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    pub ticker: String,
    pub bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn empty(ticker: &str) -> Self {
        Self {
            ticker: ticker.to_string(),
            bars: Vec::new(),
        }
    }

    /// Last-bar-over-previous-bar change in percent, rounded to 2 decimals.
    /// Fewer than 2 bars means no measurable change.
    pub fn percent_change(&self) -> f64 {
        if self.bars.len() < 2 {
            return 0.0;
        }
        let prev = self.bars[self.bars.len() - 2].close;
        let last = self.bars[self.bars.len() - 1].close;
        if prev == 0.0 {
            return 0.0;
        }
        ((last - prev) / prev * 100.0 * 100.0).round() / 100.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexChange {
    pub ticker: String,
    pub percent_change: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OptionLeg {
    pub open_interest: f64,
    pub last_price: f64,
}

/// One strike row of the chain. A leg that the exchange did not publish is
/// absent, not zeroed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrikeRecord {
    pub strike_price: f64,
    pub call: Option<OptionLeg>,
    pub put: Option<OptionLeg>,
}

impl StrikeRecord {
    /// Both legs quoted and a sane strike.
    pub fn is_eligible(&self) -> bool {
        self.strike_price > 0.0 && self.call.is_some() && self.put.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainSnapshot {
    pub underlying_value: f64,
    pub total_call_oi: Option<f64>,
    pub total_put_oi: Option<f64>,
    /// Expiries as listed by the exchange, `DD-Mon-YYYY`, nearest first.
    pub expiry_dates: Vec<String>,
    pub strikes: Vec<StrikeRecord>,
}
