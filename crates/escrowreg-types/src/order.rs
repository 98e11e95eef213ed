//! Order model for the EscrowReg lifecycle state machine.
//!
//! An order moves `Created → Shipped` and nowhere else. Shipment is the
//! single point where escrowed value is released.

use serde::{Deserialize, Serialize};

use crate::{Address, ContentHash, CurrencyCode, OrderId};

/// Lifecycle status of an order.
///
/// Numeric codes are part of the persisted encoding: `Created = 0`,
/// `Shipped = 2`. Code `1` is deliberately unassigned — the reference
/// encoding leaves a gap for an unobserved intermediate state, and we
/// preserve the gap rather than invent a state for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[repr(u8)]
pub enum OrderStatus {
    Created = 0,
    Shipped = 2,
}

impl OrderStatus {
    /// Numeric wire/storage code.
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Decode a status code. Returns `None` for the reserved gap at `1`
    /// and anything else unknown.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Created),
            2 => Some(Self::Shipped),
            _ => None,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "CREATED"),
            Self::Shipped => write!(f, "SHIPPED"),
        }
    }
}

/// An escrowed purchase.
///
/// Created exactly once per caller-supplied [`OrderId`]; mutated only by
/// the lifecycle transitions on the order registry. `value` is fixed at
/// creation and never changes. Timestamps are ledger-clock values with
/// `0` meaning "not yet set".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// The buyer's ledger address (the creating caller).
    pub buyer: Address,
    /// The buyer's stripped public key, stored opaquely so the store can
    /// encrypt fulfilment data to the buyer off-registry.
    pub buyer_key: [u8; 32],
    /// The store party's address. Only this address may mark shipment.
    pub store: Address,
    /// Receives the microperun fee cut at settlement.
    pub affiliate: Address,
    pub currency: CurrencyCode,
    /// Currency-denominated quantity, stored verbatim for off-registry
    /// pricing; the registry does not derive `value` from it.
    pub prebuffer_quantity: u128,
    /// Content hash of the encapsulated order metadata blob.
    pub encapsulated_meta_hash: ContentHash,
    /// Ledger time of creation.
    pub created_at: u64,
    /// Ledger time of shipment; `0` until shipped.
    pub shipped_at: u64,
    pub status: OrderStatus,
    /// Escrowed order value, locked under the registry until shipment.
    pub value: u128,
}

impl Order {
    /// Whether the order is still awaiting shipment.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == OrderStatus::Created
    }
}
