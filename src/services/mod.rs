pub mod cache;
pub mod projection;
pub mod stock;

pub use cache::SymbolCache;
pub use stock::{normalize_symbol, StockService};
