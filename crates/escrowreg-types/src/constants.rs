//! System-wide constants for the EscrowReg registries.

/// One perun (100%) expressed in microperun. Fee rates are parts-per-million
/// of order value.
pub const MICROPERUN: u128 = 1_000_000;

/// Maximum byte length of a store identifier (bounded by its fixed-width
/// 32-byte storage key).
pub const MAX_STORE_ID_LEN: usize = 32;

/// Fixed width of a currency code in bytes (e.g. `"USD6"`).
pub const CURRENCY_CODE_LEN: usize = 4;

/// Width of a ledger account address in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Width of an order identifier in bytes.
pub const ORDER_ID_LEN: usize = 32;

/// Ledger timestamp value meaning "not yet set".
pub const TIMESTAMP_UNSET: u64 = 0;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "EscrowReg";
