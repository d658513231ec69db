use chrono::NaiveDate;
use tracing::debug;

use crate::config::{BudgetConfig, ThresholdConfig};
use crate::gateways::{ChainSnapshot, StrikeRecord};

pub const EXPIRY_FORMAT: &str = "%d-%b-%Y";

/// Features extracted from one chain snapshot. `pcr` and `underlying` are
/// always populated (with fallbacks); the expiry and top strikes are absent
/// when the chain gives no candidate, which downstream reads as "no signal".
#[derive(Debug, Clone)]
pub struct ChainView {
    pub pcr: f64,
    pub underlying: f64,
    pub valid_expiry: Option<String>,
    pub top_call: Option<StrikeRecord>,
    pub top_put: Option<StrikeRecord>,
}

pub struct ChainAnalyzer {
    budget: BudgetConfig,
    thresholds: ThresholdConfig,
}

impl ChainAnalyzer {
    pub fn new(budget: BudgetConfig, thresholds: ThresholdConfig) -> Self {
        Self { budget, thresholds }
    }

    pub fn analyze(&self, snapshot: &ChainSnapshot, today: NaiveDate) -> ChainView {
        let pcr = Self::put_call_ratio(snapshot);
        let valid_expiry = self.select_expiry(&snapshot.expiry_dates, today);

        let eligible: Vec<&StrikeRecord> = snapshot
            .strikes
            .iter()
            .filter(|s| s.is_eligible())
            .collect();

        let top_call = self.top_strike(&eligible, true);
        let top_put = self.top_strike(&eligible, false);

        debug!(
            "🔍 Chain view: pcr={:.2}, expiry={:?}, top_call={:?}, top_put={:?}",
            pcr,
            valid_expiry,
            top_call.as_ref().map(|s| s.strike_price),
            top_put.as_ref().map(|s| s.strike_price)
        );

        ChainView {
            pcr,
            underlying: snapshot.underlying_value,
            valid_expiry,
            top_call,
            top_put,
        }
    }

    /// Total put OI over total call OI. A zero or unpublished call total makes
    /// the ratio meaningless, so it falls back to the neutral 1.0.
    pub fn put_call_ratio(snapshot: &ChainSnapshot) -> f64 {
        match (snapshot.total_put_oi, snapshot.total_call_oi) {
            (Some(put_oi), Some(call_oi)) if call_oi > 0.0 => put_oi / call_oi,
            _ => 1.0,
        }
    }

    /// First listed expiry at least `min_days_to_expiry` out; if none
    /// qualifies, the nearest listed one; None only when the list is empty.
    /// Unparseable dates are skipped by the lookahead rule, not propagated.
    fn select_expiry(&self, expiry_dates: &[String], today: NaiveDate) -> Option<String> {
        for raw in expiry_dates {
            if let Ok(date) = NaiveDate::parse_from_str(raw, EXPIRY_FORMAT) {
                if (date - today).num_days() >= self.thresholds.min_days_to_expiry {
                    return Some(raw.clone());
                }
            }
        }
        expiry_dates.first().cloned()
    }

    /// Best budget-eligible strike for one side: maximum open interest on that
    /// leg, first-encountered wins ties.
    fn top_strike(&self, eligible: &[&StrikeRecord], call_side: bool) -> Option<StrikeRecord> {
        let mut best: Option<&StrikeRecord> = None;
        let mut best_oi = f64::NEG_INFINITY;

        for &strike in eligible {
            let leg = if call_side { strike.call } else { strike.put };
            let Some(leg) = leg else { continue };
            if leg.last_price < self.budget.min_premium || leg.last_price > self.budget.max_premium
            {
                continue;
            }
            if leg.open_interest > best_oi {
                best_oi = leg.open_interest;
                best = Some(strike);
            }
        }

        best.cloned()
    }
}
