pub mod agent;
pub mod config;
pub mod gateways;
pub mod ledger;
pub mod report;
pub mod signal;
