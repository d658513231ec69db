use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{RiskConfig, ThresholdConfig};
use crate::signal::chain::{ChainView, EXPIRY_FORMAT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Call,
    Put,
}

impl Side {
    /// Exchange code used in the option symbol.
    pub fn code(&self) -> &'static str {
        match self {
            Side::Call => "CE",
            Side::Put => "PE",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeSignal {
    pub side: Side,
    pub symbol: String,
    pub strike: f64,
    pub entry: f64,
    pub target: f64,
    pub stop_loss: f64,
    pub open_interest: f64,
    /// Filled in by the confidence scorer after selection.
    pub confidence: u8,
}

/// Outcome of one evaluation. Neutral is a normal result, not an error:
/// nothing is written downstream.
#[derive(Debug, Clone)]
pub enum Decision {
    Entry(TradeSignal),
    Neutral,
}

/// The decision rule itself. Evaluated once per run; the first matching arm
/// wins and the arms are mutually exclusive by construction.
pub struct SignalEngine {
    index: String,
    thresholds: ThresholdConfig,
    risk: RiskConfig,
}

impl SignalEngine {
    pub fn new(index: String, thresholds: ThresholdConfig, risk: RiskConfig) -> Self {
        Self {
            index,
            thresholds,
            risk,
        }
    }

    pub fn evaluate(&self, sentiment: f64, view: &ChainView) -> Decision {
        // A side needs a tradable contract: a budget-eligible strike and a
        // listed expiry to name it by.
        let expiry = match &view.valid_expiry {
            Some(e) => e,
            None => {
                debug!("🚫 No listed expiry; no contract to recommend");
                return Decision::Neutral;
            }
        };

        if sentiment > 0.0 && view.pcr < self.thresholds.bullish_pcr_max {
            if let Some(strike) = &view.top_call {
                if let Some(leg) = &strike.call {
                    info!(
                        "📈 CALL selected: strike {} @ premium {:.2} (sentiment {:+.2}, pcr {:.2})",
                        strike.strike_price, leg.last_price, sentiment, view.pcr
                    );
                    return Decision::Entry(self.build_signal(
                        Side::Call,
                        strike.strike_price,
                        leg.last_price,
                        leg.open_interest,
                        expiry,
                    ));
                }
            }
            debug!("🚫 Bullish thresholds met but no budget-eligible call strike");
        } else if sentiment < 0.0 && view.pcr > self.thresholds.bearish_pcr_min {
            if let Some(strike) = &view.top_put {
                if let Some(leg) = &strike.put {
                    info!(
                        "📉 PUT selected: strike {} @ premium {:.2} (sentiment {:+.2}, pcr {:.2})",
                        strike.strike_price, leg.last_price, sentiment, view.pcr
                    );
                    return Decision::Entry(self.build_signal(
                        Side::Put,
                        strike.strike_price,
                        leg.last_price,
                        leg.open_interest,
                        expiry,
                    ));
                }
            }
            debug!("🚫 Bearish thresholds met but no budget-eligible put strike");
        }

        Decision::Neutral
    }

    fn build_signal(
        &self,
        side: Side,
        strike: f64,
        entry: f64,
        open_interest: f64,
        expiry: &str,
    ) -> TradeSignal {
        TradeSignal {
            side,
            symbol: self.synthesize_symbol(side, strike, expiry),
            strike,
            entry,
            target: round2(entry * self.risk.target_multiplier),
            stop_loss: round2(entry * self.risk.stop_loss_multiplier),
            open_interest,
            confidence: 0,
        }
    }

    /// `OPTIDX<INDEX><DDMONYYYY><CE|PE><strike>.00`, e.g.
    /// `OPTIDXBANKNIFTY28NOV2024CE52000.00`.
    fn synthesize_symbol(&self, side: Side, strike: f64, expiry: &str) -> String {
        format!(
            "OPTIDX{}{}{}{:.2}",
            self.index,
            compact_expiry(expiry),
            side.code(),
            strike
        )
    }
}

fn compact_expiry(expiry: &str) -> String {
    match NaiveDate::parse_from_str(expiry, EXPIRY_FORMAT) {
        Ok(date) => date.format("%d%b%Y").to_string().to_uppercase(),
        // Listed but in an unexpected shape: strip separators and keep going.
        Err(_) => expiry
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_uppercase(),
    }
}

pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
