use serde::Serialize;

/// A stock offered in the dashboard selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StockOption {
    pub label: &'static str,
    pub symbol: &'static str,
}

/// Stocks offered in the selector, default first.
pub const AVAILABLE_STOCKS: [StockOption; 5] = [
    StockOption { label: "Apple", symbol: "AAPL" },
    StockOption { label: "Microsoft", symbol: "MSFT" },
    StockOption { label: "Google", symbol: "GOOGL" },
    StockOption { label: "Amazon", symbol: "AMZN" },
    StockOption { label: "Tesla", symbol: "TSLA" },
];

/// Display label for a symbol, falling back to the symbol itself.
pub fn stock_label(symbol: &str) -> &str {
    AVAILABLE_STOCKS
        .iter()
        .find(|s| s.symbol.eq_ignore_ascii_case(symbol))
        .map(|s| s.label)
        .unwrap_or(symbol)
}
