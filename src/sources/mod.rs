pub mod alphavantage;
pub mod model_api;

pub use alphavantage::AlphaVantageClient;
pub use model_api::ModelClient;
