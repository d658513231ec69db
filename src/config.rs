use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub signal: SignalConfig,
    pub budget: BudgetConfig,
    pub thresholds: ThresholdConfig,
    pub risk: RiskConfig,
    pub confidence: ConfidenceConfig,
    pub ledger: LedgerConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SignalConfig {
    pub index: String,
    pub sentiment_basket: Vec<String>,
    pub lookback_days: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BudgetConfig {
    pub min_premium: f64,
    pub max_premium: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThresholdConfig {
    pub bullish_pcr_max: f64,
    pub bearish_pcr_min: f64,
    pub min_days_to_expiry: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RiskConfig {
    pub target_multiplier: f64,
    pub stop_loss_multiplier: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConfidenceConfig {
    pub sentiment_floor: f64,
    pub sentiment_bonus: u8,
    pub pcr_bonus: u8,
    pub oi_bonus: u8,
    pub premium_bonus: u8,
    pub high_oi_floor: f64,
    pub high_confidence_floor: u8,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LedgerConfig {
    pub path: String,
    pub report_path: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let signal = SignalConfig {
            index: env::var("INDEX_SYMBOL").unwrap_or_else(|_| "BANKNIFTY".to_string()),
            sentiment_basket: env::var("SENTIMENT_BASKET")
                .unwrap_or_else(|_| "^GSPC,^IXIC,^DJI,^N225,^HSI".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            lookback_days: env::var("LOOKBACK_DAYS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),
        };

        let budget = BudgetConfig {
            min_premium: env::var("BUDGET_MIN_PREMIUM")
                .unwrap_or_else(|_| "500.0".to_string())
                .parse()
                .unwrap_or(500.0),
            max_premium: env::var("BUDGET_MAX_PREMIUM")
                .unwrap_or_else(|_| "600.0".to_string())
                .parse()
                .unwrap_or(600.0),
        };

        let thresholds = ThresholdConfig {
            bullish_pcr_max: env::var("BULLISH_PCR_MAX")
                .unwrap_or_else(|_| "0.9".to_string())
                .parse()
                .unwrap_or(0.9),
            bearish_pcr_min: env::var("BEARISH_PCR_MIN")
                .unwrap_or_else(|_| "1.1".to_string())
                .parse()
                .unwrap_or(1.1),
            min_days_to_expiry: env::var("MIN_DAYS_TO_EXPIRY")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .unwrap_or(3),
        };

        let risk = RiskConfig {
            target_multiplier: env::var("TARGET_MULTIPLIER")
                .unwrap_or_else(|_| "1.5".to_string())
                .parse()
                .unwrap_or(1.5),
            stop_loss_multiplier: env::var("STOP_LOSS_MULTIPLIER")
                .unwrap_or_else(|_| "0.7".to_string())
                .parse()
                .unwrap_or(0.7),
        };

        let confidence = ConfidenceConfig {
            sentiment_floor: env::var("CONFIDENCE_SENTIMENT_FLOOR")
                .unwrap_or_else(|_| "1.0".to_string())
                .parse()
                .unwrap_or(1.0),
            sentiment_bonus: env::var("CONFIDENCE_SENTIMENT_BONUS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
            pcr_bonus: env::var("CONFIDENCE_PCR_BONUS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
            oi_bonus: env::var("CONFIDENCE_OI_BONUS")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .unwrap_or(20),
            premium_bonus: env::var("CONFIDENCE_PREMIUM_BONUS")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .unwrap_or(20),
            high_oi_floor: env::var("HIGH_OI_FLOOR")
                .unwrap_or_else(|_| "100000.0".to_string())
                .parse()
                .unwrap_or(100_000.0),
            high_confidence_floor: env::var("HIGH_CONFIDENCE_FLOOR")
                .unwrap_or_else(|_| "80".to_string())
                .parse()
                .unwrap_or(80),
        };

        let ledger = LedgerConfig {
            path: env::var("TRADE_LOG_PATH").unwrap_or_else(|_| "trade_log.csv".to_string()),
            report_path: env::var("REPORT_PATH").unwrap_or_else(|_| "report.md".to_string()),
        };

        Ok(Config {
            signal,
            budget,
            thresholds,
            risk,
            confidence,
            ledger,
        })
    }
}

impl Default for Config {
    /// Spec defaults, handy for tests that don't want env lookups.
    fn default() -> Self {
        Config {
            signal: SignalConfig {
                index: "BANKNIFTY".to_string(),
                sentiment_basket: vec![
                    "^GSPC".to_string(),
                    "^IXIC".to_string(),
                    "^DJI".to_string(),
                    "^N225".to_string(),
                    "^HSI".to_string(),
                ],
                lookback_days: 5,
            },
            budget: BudgetConfig {
                min_premium: 500.0,
                max_premium: 600.0,
            },
            thresholds: ThresholdConfig {
                bullish_pcr_max: 0.9,
                bearish_pcr_min: 1.1,
                min_days_to_expiry: 3,
            },
            risk: RiskConfig {
                target_multiplier: 1.5,
                stop_loss_multiplier: 0.7,
            },
            confidence: ConfidenceConfig {
                sentiment_floor: 1.0,
                sentiment_bonus: 30,
                pcr_bonus: 30,
                oi_bonus: 20,
                premium_bonus: 20,
                high_oi_floor: 100_000.0,
                high_confidence_floor: 80,
            },
            ledger: LedgerConfig {
                path: "trade_log.csv".to_string(),
                report_path: "report.md".to_string(),
            },
        }
    }
}
