//! Administrator-gated registry parameters.
//!
//! Global price/administration state is modelled as an explicit
//! configuration object owned by the registry, mutated only through
//! administrator-gated transitions — never as ambient global state.

use serde::{Deserialize, Serialize};

use crate::Address;

/// Global settlement parameters for the order registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryParams {
    /// The privileged caller permitted to mutate parameters and prices.
    pub admin: Address,
    /// Working capital transferred to the store at order creation, before
    /// fulfilment.
    pub store_prefund: u128,
    /// Affiliate fee rate in parts-per-million of order value.
    pub affiliate_fee_microperun: u128,
}

impl RegistryParams {
    /// Fresh parameters with zeroed prefund and fee. Both must be set by
    /// the administrator before orders carry meaningful economics.
    #[must_use]
    pub fn new(admin: Address) -> Self {
        Self {
            admin,
            store_prefund: 0,
            affiliate_fee_microperun: 0,
        }
    }
}
