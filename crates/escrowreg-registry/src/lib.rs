//! # escrowreg-registry
//!
//! **Settlement core**: the registry state machines and validation rules
//! for a two-sided marketplace on a shared deterministic ledger.
//!
//! ## Architecture
//!
//! 1. **PriceTable**: currency → unit price, administrator-gated
//! 2. **StoreRegistry**: unique store identities bound to content-addressed
//!    metadata
//! 3. **OrderRegistry**: the escrowed order lifecycle
//!    (`Created → Shipped`), prefunding at creation and fee-split release
//!    at shipment
//!
//! ## Transition Flow
//!
//! ```text
//! client → OrderRegistry.create() → PriceTable.quote()
//!        → EscrowBook.apply(caller→registry, registry→store)
//!        → DocumentStore.put() → Order { status: Created }
//!
//! store  → OrderRegistry.mark_as_shipped()
//!        → EscrowBook.apply(registry→affiliate, registry→payout)
//!        → Order { status: Shipped }
//! ```
//!
//! Every transition validates fully before mutating; an error leaves all
//! entities unchanged.

pub mod order_registry;
pub mod price_table;
pub mod store_registry;

pub use order_registry::{CreateOrder, OrderRegistry};
pub use price_table::PriceTable;
pub use store_registry::StoreRegistry;
