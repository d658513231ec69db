pub mod chain;
pub mod confidence;
pub mod engine;
pub mod sentiment;

pub use chain::{ChainAnalyzer, ChainView};
pub use confidence::ConfidenceScorer;
pub use engine::{Decision, Side, SignalEngine, TradeSignal};
pub use sentiment::{SentimentAggregator, SentimentReading};
