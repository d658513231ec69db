use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// One accepted recommendation, as persisted. Column names are the on-disk
/// header, `Date` in `DD-Mon-YYYY`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Symbol")]
    pub symbol: String,
    #[serde(rename = "Entry")]
    pub entry: f64,
    #[serde(rename = "Target")]
    pub target: f64,
    #[serde(rename = "StopLoss")]
    pub stop_loss: f64,
    #[serde(rename = "Confidence")]
    pub confidence: u8,
}

#[derive(Debug, Clone, Default)]
pub struct LedgerSummary {
    pub count: usize,
    /// None when the ledger is empty; shown as N/A.
    pub avg_confidence: Option<f64>,
    pub high_confidence: usize,
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("could not open trade log: {0}")]
    Open(#[source] std::io::Error),
    #[error("could not append trade record: {0}")]
    Write(#[source] std::io::Error),
    #[error("could not encode trade record: {0}")]
    Encode(#[from] csv::Error),
}

/// Append-only CSV trade log.
///
/// Rows are serialized in memory first and the file is opened `O_APPEND`, so
/// each record lands in one write and concurrent invocations cannot interleave
/// half-rows. Existing rows are never rewritten.
pub struct TradeLedger {
    path: PathBuf,
    high_confidence_floor: u8,
}

impl TradeLedger {
    pub fn new(path: impl AsRef<Path>, high_confidence_floor: u8) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            high_confidence_floor,
        }
    }

    pub fn append(&self, record: &TradeRecord) -> Result<(), LedgerError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(LedgerError::Open)?;

        let is_fresh = file.metadata().map(|m| m.len() == 0).unwrap_or(false);

        let mut writer = csv::WriterBuilder::new()
            .has_headers(is_fresh)
            .from_writer(Vec::new());
        writer.serialize(record)?;
        let row = writer
            .into_inner()
            .map_err(|e| LedgerError::Write(e.into_error()))?;

        file.write_all(&row).map_err(LedgerError::Write)?;
        file.flush().map_err(LedgerError::Write)?;

        debug!("🧾 Trade appended to {}: {}", self.path.display(), record.symbol);
        Ok(())
    }

    /// Full-history rollup. A missing log is simply an empty history, and a
    /// row that no longer parses is skipped rather than poisoning the summary.
    pub fn summarize(&self) -> LedgerSummary {
        let mut reader = match csv::Reader::from_path(&self.path) {
            Ok(r) => r,
            Err(e) => {
                debug!("🧾 No readable trade log at {} ({})", self.path.display(), e);
                return LedgerSummary::default();
            }
        };

        let mut count = 0usize;
        let mut confidence_total = 0u64;
        let mut high_confidence = 0usize;

        for row in reader.deserialize::<TradeRecord>() {
            match row {
                Ok(record) => {
                    count += 1;
                    confidence_total += u64::from(record.confidence);
                    if record.confidence >= self.high_confidence_floor {
                        high_confidence += 1;
                    }
                }
                Err(e) => warn!("⚠️ Skipping unreadable trade log row: {}", e),
            }
        }

        let avg_confidence = if count > 0 {
            Some(confidence_total as f64 / count as f64)
        } else {
            None
        };

        LedgerSummary {
            count,
            avg_confidence,
            high_confidence,
        }
    }
}
