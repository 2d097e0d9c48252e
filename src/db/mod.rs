pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod queries;
pub mod reports;
pub mod stats;
pub mod store;
pub mod themes;
