//! Percent change between two polls
//!
//! Everything here is pure: the tracker hands in the current [`Snapshot`] and
//! the [`PriceMemory`] from the previous cycle and gets display rows back.

use crate::{store::PriceMemory, types::Snapshot};

/// How a row's price moved since the previous poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    /// No current price
    Missing,
    /// Current price but nothing usable to compare against
    NoBaseline,
    Up,
    Down,
    Flat,
}

impl Trend {
    /// Classifies a row from its current price and computed delta
    pub fn classify(price: Option<f64>, delta: Option<f64>) -> Self {
        match (price, delta) {
            (None, _) => Trend::Missing,
            (Some(_), None) => Trend::NoBaseline,
            (Some(_), Some(d)) if d > 0.0 => Trend::Up,
            (Some(_), Some(d)) if d < 0.0 => Trend::Down,
            (Some(_), Some(_)) => Trend::Flat,
        }
    }
}

/// One line of the comparison table
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRow {
    pub id: String,
    pub price: Option<f64>,
    /// Fractional change, `0.25` for +25%
    pub delta: Option<f64>,
    pub trend: Trend,
}

/// Fractional change from `previous` to `current`
///
/// Undefined when either side is missing or the previous price is zero.
pub fn percent_change(current: Option<f64>, previous: Option<f64>) -> Option<f64> {
    match (current, previous) {
        (Some(current), Some(previous)) if previous != 0.0 => {
            Some((current - previous) / previous)
        }
        _ => None,
    }
}

/// Builds one row per identifier, in the given order
pub fn compare(ids: &[String], current: &Snapshot, previous: &PriceMemory) -> Vec<PriceRow> {
    ids.iter()
        .map(|id| {
            let price = current.price(id);
            let delta = percent_change(price, previous.price(id));
            PriceRow {
                id: id.clone(),
                price,
                delta,
                trend: Trend::classify(price, delta),
            }
        })
        .collect()
}

/// Formats a fractional change as a signed percentage, e.g. `+25.00%`
pub fn format_change(delta: f64) -> String {
    let pct = delta * 100.0;
    if pct >= 0.0 {
        // abs() folds -0.0 into +0.00%
        format!("+{:.2}%", pct.abs())
    } else {
        format!("{:.2}%", pct)
    }
}
