use crate::config::{BudgetConfig, ConfidenceConfig, ThresholdConfig};

/// Maps (sentiment, pcr, open interest, premium) to a 0-100 score. Each check
/// contributes its whole bonus or nothing; with the default 30/30/20/20
/// bonuses the maximum is exactly 100. Pure, no side effects.
pub struct ConfidenceScorer {
    config: ConfidenceConfig,
    thresholds: ThresholdConfig,
    budget: BudgetConfig,
}

impl ConfidenceScorer {
    pub fn new(
        config: ConfidenceConfig,
        thresholds: ThresholdConfig,
        budget: BudgetConfig,
    ) -> Self {
        Self {
            config,
            thresholds,
            budget,
        }
    }

    pub fn score(&self, sentiment: f64, pcr: f64, open_interest: f64, premium: f64) -> u8 {
        let mut score: u16 = 0;

        if sentiment.abs() > self.config.sentiment_floor {
            score += u16::from(self.config.sentiment_bonus);
        }
        // Decisive skew on either side of the dead zone.
        if pcr < self.thresholds.bullish_pcr_max || pcr > self.thresholds.bearish_pcr_min {
            score += u16::from(self.config.pcr_bonus);
        }
        if open_interest > self.config.high_oi_floor {
            score += u16::from(self.config.oi_bonus);
        }
        if premium >= self.budget.min_premium && premium <= self.budget.max_premium {
            score += u16::from(self.config.premium_bonus);
        }

        score.min(100) as u8
    }
}
