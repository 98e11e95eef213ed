//! Currency price table.
//!
//! Maps fixed-width currency codes to unit prices. Entries are
//! overwritten, never removed, so a price of zero is indistinguishable
//! from "no price configured" — [`PriceTable::quote`] rejects both.

use std::collections::HashMap;

use escrowreg_types::{CurrencyCode, PriceEntry, RegistryError, Result};

/// Mutable-by-administrator mapping from currency code to unit price.
///
/// Authorization is enforced by the owning registry; the table itself is
/// a plain component.
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    prices: HashMap<CurrencyCode, u128>,
}

impl PriceTable {
    #[must_use]
    pub fn new() -> Self {
        Self {
            prices: HashMap::new(),
        }
    }

    /// Insert or overwrite the unit price for `currency`. Idempotent:
    /// repeated identical calls are not an error.
    pub fn set(&mut self, currency: CurrencyCode, unit_price: u128) {
        self.prices.insert(currency, unit_price);
    }

    /// The stored unit price, or `0` if unset. Callers must treat `0` as
    /// "no price configured", not a valid quote.
    #[must_use]
    pub fn get(&self, currency: CurrencyCode) -> u128 {
        self.prices.get(&currency).copied().unwrap_or(0)
    }

    /// A usable quote: the unit price if configured and non-zero.
    ///
    /// # Errors
    /// Returns `UnknownCurrency` for unset and zero-priced currencies
    /// alike.
    pub fn quote(&self, currency: CurrencyCode) -> Result<u128> {
        match self.get(currency) {
            0 => Err(RegistryError::UnknownCurrency(currency)),
            price => Ok(price),
        }
    }

    /// Snapshot of all configured entries.
    #[must_use]
    pub fn entries(&self) -> Vec<PriceEntry> {
        self.prices
            .iter()
            .map(|(&currency, &unit_price)| PriceEntry {
                currency,
                unit_price,
            })
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}
