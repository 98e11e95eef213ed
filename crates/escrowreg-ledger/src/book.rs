//! Per-address escrow accounting.
//!
//! The `EscrowBook` is the source of truth for all value the core holds
//! or moves. All arithmetic is unsigned `u128` with `checked_*` ops:
//! overflow fails closed with [`RegistryError::Overflow`], never wraps.
//! The core never issues a transfer exceeding the funds held at the
//! debited address.

use std::collections::HashMap;

use escrowreg_types::{Address, RegistryError, Result, constants::MICROPERUN};

/// A single value movement between two addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    pub from: Address,
    pub to: Address,
    pub amount: u128,
}

impl Transfer {
    #[must_use]
    pub fn new(from: Address, to: Address, amount: u128) -> Self {
        Self { from, to, amount }
    }
}

/// Compute a microperun fee cut of `value`.
///
/// `fee = value * rate_microperun / 1_000_000`, rounded down.
///
/// # Errors
/// Returns `Overflow` if the intermediate product exceeds `u128`.
pub fn fee_of(value: u128, rate_microperun: u128) -> Result<u128> {
    let scaled = value
        .checked_mul(rate_microperun)
        .ok_or(RegistryError::Overflow)?;
    Ok(scaled / MICROPERUN)
}

/// Tracks per-address balances conceptually owned by the ledger but
/// computed by this core.
///
/// Mutations happen only through [`EscrowBook::deposit`] and the transfer
/// operations; transfers are all-or-nothing, so an aborted transition
/// leaves every balance unchanged.
#[derive(Debug, Clone, Default)]
pub struct EscrowBook {
    balances: HashMap<Address, u128>,
}

impl EscrowBook {
    /// Create an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
        }
    }

    /// Host-side funding of an address (e.g. test fixtures, deposits from
    /// outside the registry's scope).
    ///
    /// # Errors
    /// Returns `Overflow` if the credit would exceed the balance width.
    pub fn deposit(&mut self, addr: Address, amount: u128) -> Result<()> {
        let entry = self.balances.entry(addr).or_insert(0);
        *entry = entry.checked_add(amount).ok_or(RegistryError::Overflow)?;
        Ok(())
    }

    /// Balance held at `addr`; zero if the address has never been seen.
    #[must_use]
    pub fn balance(&self, addr: Address) -> u128 {
        self.balances.get(&addr).copied().unwrap_or(0)
    }

    /// Move `amount` from one address to another atomically.
    ///
    /// # Errors
    /// - `InsufficientFunds` if the debited address holds less than `amount`
    /// - `Overflow` if the credit would wrap
    ///
    /// On any error no balance changes.
    pub fn transfer(&mut self, from: Address, to: Address, amount: u128) -> Result<()> {
        self.apply(&[Transfer::new(from, to, amount)])
    }

    /// Apply a sequence of transfers as one all-or-nothing batch.
    ///
    /// The whole sequence is validated and executed against a scratch
    /// copy; the book commits only if every step succeeds. This is the
    /// atomicity primitive the registry transitions rely on: either all
    /// transfers and the state transition succeed, or none do.
    ///
    /// # Errors
    /// See [`EscrowBook::transfer`]. The first failing step aborts the
    /// whole batch.
    pub fn apply(&mut self, transfers: &[Transfer]) -> Result<()> {
        let mut scratch = self.balances.clone();
        for t in transfers {
            let from_balance = scratch.get(&t.from).copied().unwrap_or(0);
            if from_balance < t.amount {
                return Err(RegistryError::InsufficientFunds {
                    needed: t.amount,
                    available: from_balance,
                });
            }
            // Debit before reading the credit side so self-transfers
            // observe the debited balance.
            scratch.insert(t.from, from_balance - t.amount);
            let to_balance = scratch.get(&t.to).copied().unwrap_or(0);
            let credited = to_balance
                .checked_add(t.amount)
                .ok_or(RegistryError::Overflow)?;
            scratch.insert(t.to, credited);
        }
        self.balances = scratch;
        tracing::trace!(steps = transfers.len(), "escrow batch committed");
        Ok(())
    }

    /// Sum of all balances. Conservation check: transfers never change it.
    ///
    /// # Errors
    /// Returns `Overflow` if the sum exceeds `u128`.
    pub fn total_supply(&self) -> Result<u128> {
        self.balances
            .values()
            .try_fold(0u128, |acc, &b| acc.checked_add(b))
            .ok_or(RegistryError::Overflow)
    }

    /// Number of addresses with a recorded balance entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.balances.len()
    }

    /// Whether the book has no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }
}
