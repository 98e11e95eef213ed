//! Transaction context supplied by the ledger execution environment.

use escrowreg_types::Address;

/// The envelope of a single ledger transaction: who is calling, how much
/// value rides along, and the ledger clock at application time.
///
/// The clock is block-granular and monotonic; the core never reads time
/// from anywhere else, so identical transitions replay identically on
/// every node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxContext {
    /// The calling account's address.
    pub caller: Address,
    /// Value attached to the call, already debited from the caller by the
    /// host and available for escrow.
    pub attached_value: u128,
    /// Ledger time at transaction application.
    pub now: u64,
}

impl TxContext {
    /// A transaction carrying attached value.
    #[must_use]
    pub fn new(caller: Address, attached_value: u128, now: u64) -> Self {
        Self {
            caller,
            attached_value,
            now,
        }
    }

    /// A plain call with no attached value (reads, admin transitions).
    #[must_use]
    pub fn call(caller: Address, now: u64) -> Self {
        Self::new(caller, 0, now)
    }
}
