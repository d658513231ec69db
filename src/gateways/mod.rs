pub mod api;
pub mod nse;
pub mod types;
pub mod yahoo;

pub use api::{ChainError, MarketDataGateway, OptionChainGateway};
pub use nse::NseClient;
pub use types::{ChainSnapshot, IndexChange, OptionLeg, PriceBar, PriceSeries, StrikeRecord};
pub use yahoo::YahooClient;
