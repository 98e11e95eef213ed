//! Price entry model.

use serde::{Deserialize, Serialize};

use crate::CurrencyCode;

/// A unit price for one currency.
///
/// Mutable only by the table administrator; overwritten, never removed.
/// A `unit_price` of zero is indistinguishable from "no price configured"
/// and callers must treat it as such, never as a free quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceEntry {
    pub currency: CurrencyCode,
    pub unit_price: u128,
}
