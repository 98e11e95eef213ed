//! # escrowreg-types
//!
//! Shared types, errors, and constants for the **EscrowReg** settlement
//! registries.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`Address`], [`OrderId`], [`StoreId`], [`CurrencyCode`], [`ContentHash`]
//! - **Order model**: [`Order`], [`OrderStatus`]
//! - **Store model**: [`StoreRecord`]
//! - **Pricing**: [`PriceEntry`]
//! - **Registry parameters**: [`RegistryParams`]
//! - **Errors**: [`RegistryError`] with `ER_ERR_` prefix codes
//! - **Constants**: fixed widths, the microperun scale, defaults

pub mod constants;
pub mod error;
pub mod ids;
pub mod order;
pub mod params;
pub mod price;
pub mod store;

// Re-export all primary types at crate root for ergonomic imports:
//   use escrowreg_types::{Order, OrderStatus, StoreRecord, ...};

pub use error::*;
pub use ids::*;
pub use order::*;
pub use params::*;
pub use price::*;
pub use store::*;

// Constants are accessed via `escrowreg_types::constants::FOO`
// (not re-exported to avoid name collisions).
