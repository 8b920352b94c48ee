use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single monthly close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Point on the price history chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub date: NaiveDate,
    /// Short axis label, e.g. "Jan 21".
    pub label: String,
    pub price: f64,
}

/// Price history for a symbol.
///
/// Always ascending by date with one close per date, every close finite and
/// positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series from raw closes in any order.
    ///
    /// Drops closes before `since` and closes that are not finite and
    /// positive. Duplicate dates keep the last close given.
    pub fn from_closes(
        symbol: &str,
        closes: impl IntoIterator<Item = PricePoint>,
        since: NaiveDate,
    ) -> Self {
        let mut points: Vec<PricePoint> = closes
            .into_iter()
            .filter(|p| p.date >= since && p.close.is_finite() && p.close > 0.0)
            .collect();

        // Stable sort keeps input order within a date; keep the last one.
        points.sort_by_key(|p| p.date);
        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.date == point.date => *last = point,
                _ => deduped.push(point),
            }
        }

        Self {
            symbol: symbol.to_uppercase(),
            points: deduped,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Closing prices, oldest first.
    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Most recent close.
    pub fn current_price(&self) -> Option<f64> {
        self.points.last().map(|p| p.close)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points formatted for the history chart.
    pub fn chart_points(&self) -> Vec<ChartPoint> {
        self.points
            .iter()
            .map(|p| ChartPoint {
                date: p.date,
                label: p.date.format("%b %y").to_string(),
                price: p.close,
            })
            .collect()
    }
}

/// First date of a trailing window of `years` ending at `today`.
///
/// Feb 29 maps to Feb 28 when the target year is not a leap year. A window
/// reaching past the earliest representable date starts at [`NaiveDate::MIN`].
pub fn history_start(today: NaiveDate, years: u32) -> NaiveDate {
    let Some(year) = i32::try_from(years)
        .ok()
        .and_then(|years| today.year().checked_sub(years))
    else {
        return NaiveDate::MIN;
    };
    NaiveDate::from_ymd_opt(year, today.month(), today.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, today.month(), 28))
        .unwrap_or(NaiveDate::MIN)
}
