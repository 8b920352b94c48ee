pub mod prediction;
pub mod price;
pub mod stock;

pub use prediction::*;
pub use price::*;
pub use stock::*;
