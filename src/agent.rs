use anyhow::{Context, Result};
use chrono::Local;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::gateways::{ChainError, MarketDataGateway, OptionChainGateway};
use crate::ledger::{TradeLedger, TradeRecord};
use crate::report;
use crate::signal::{
    ChainAnalyzer, ChainView, ConfidenceScorer, Decision, SentimentAggregator, SignalEngine,
};

/// One-shot evaluation pipeline: sentiment → chain features → decision rule →
/// confidence → ledger. Runs once and returns.
pub struct Agent {
    config: Config,
    sentiment: SentimentAggregator,
    chain_gateway: Arc<dyn OptionChainGateway>,
    analyzer: ChainAnalyzer,
    engine: SignalEngine,
    scorer: ConfidenceScorer,
    ledger: TradeLedger,
}

impl Agent {
    pub fn new(
        config: Config,
        market_data: Arc<dyn MarketDataGateway>,
        chain_gateway: Arc<dyn OptionChainGateway>,
    ) -> Self {
        let sentiment = SentimentAggregator::new(config.signal.clone(), market_data);
        let analyzer = ChainAnalyzer::new(config.budget.clone(), config.thresholds.clone());
        let engine = SignalEngine::new(
            config.signal.index.clone(),
            config.thresholds.clone(),
            config.risk.clone(),
        );
        let scorer = ConfidenceScorer::new(
            config.confidence.clone(),
            config.thresholds.clone(),
            config.budget.clone(),
        );
        let ledger = TradeLedger::new(&config.ledger.path, config.confidence.high_confidence_floor);

        Self {
            config,
            sentiment,
            chain_gateway,
            analyzer,
            engine,
            scorer,
            ledger,
        }
    }

    pub async fn run(&self) -> Result<()> {
        info!("🚀 Evaluating {} — one shot", self.config.signal.index);

        let reading = self.sentiment.score().await;
        report::print_trend(&reading);

        let view = self.chain_view().await?;

        let decision = self.engine.evaluate(reading.score, &view);

        match decision {
            Decision::Entry(mut signal) => {
                signal.confidence = self.scorer.score(
                    reading.score,
                    view.pcr,
                    signal.open_interest,
                    signal.entry,
                );
                report::print_recommendation(&signal, &view);

                let record = TradeRecord {
                    date: Local::now().format("%d-%b-%Y").to_string(),
                    symbol: signal.symbol.clone(),
                    entry: signal.entry,
                    target: signal.target,
                    stop_loss: signal.stop_loss,
                    confidence: signal.confidence,
                };
                // The recommendation stands even if persistence misbehaves.
                if let Err(e) = self.ledger.append(&record) {
                    error!("❌ Trade log write failed: {}", e);
                }

                if let Err(e) = report::write_markdown(
                    &self.config.ledger.report_path,
                    &self.config.signal.index,
                    &reading,
                    &view,
                    Some(&signal),
                ) {
                    warn!("⚠️ Could not write report: {}", e);
                }
            }
            Decision::Neutral => {
                report::print_neutral(&view);
                if let Err(e) = report::write_markdown(
                    &self.config.ledger.report_path,
                    &self.config.signal.index,
                    &reading,
                    &view,
                    None,
                ) {
                    warn!("⚠️ Could not write report: {}", e);
                }
            }
        }

        report::print_summary(&self.ledger.summarize());
        Ok(())
    }

    /// Fetch + analyze the chain. An unreachable provider degrades to a
    /// featureless view (neutral PCR, no strikes) and the run stays on the
    /// NEUTRAL path; only an unparseable response aborts.
    async fn chain_view(&self) -> Result<ChainView> {
        let today = Local::now().date_naive();
        match self.chain_gateway.fetch(&self.config.signal.index).await {
            Ok(snapshot) => Ok(self.analyzer.analyze(&snapshot, today)),
            Err(ChainError::Unavailable(reason)) => {
                warn!("⚠️ Option chain unavailable ({}), degrading to neutral", reason);
                Ok(ChainView {
                    pcr: 1.0,
                    underlying: 0.0,
                    valid_expiry: None,
                    top_call: None,
                    top_put: None,
                })
            }
            Err(e @ ChainError::Unparseable(_)) => {
                Err(e).context("option chain response could not be parsed")
            }
        }
    }
}
