//! Error types for the EscrowReg registries.
//!
//! All errors use the `ER_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Store / identifier errors
//! - 2xx: Price / currency / configuration errors
//! - 3xx: Order lifecycle errors
//! - 4xx: Escrow / accounting errors
//! - 5xx: Authorization errors
//! - 6xx: Document store errors
//! - 9xx: General / internal errors
//!
//! Every error is surfaced synchronously as the outcome of a single
//! transition; none trigger partial mutation.

use thiserror::Error;

use crate::{Address, ContentHash, CurrencyCode, OrderId, OrderStatus, StoreId};

/// Central error enum for all EscrowReg operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    // =================================================================
    // Store / Identifier Errors (1xx)
    // =================================================================
    /// The candidate store identifier violates the identifier grammar.
    #[error("ER_ERR_100: Invalid store identifier: {reason}")]
    InvalidStoreId { reason: String },

    /// A store record already exists under this identifier.
    #[error("ER_ERR_101: Store already registered: {0}")]
    StoreAlreadyRegistered(StoreId),

    /// No store record exists under this identifier.
    #[error("ER_ERR_102: Store not found: {0}")]
    StoreNotFound(StoreId),

    // =================================================================
    // Price / Currency / Configuration Errors (2xx)
    // =================================================================
    /// The currency has no configured unit price (unset or zero).
    #[error("ER_ERR_200: Unknown currency: {0}")]
    UnknownCurrency(CurrencyCode),

    /// The currency code is malformed (wrong width or bad bytes).
    #[error("ER_ERR_201: Invalid currency code: {reason}")]
    InvalidCurrencyCode { reason: String },

    /// A fee rate above one perun (1_000_000 microperun) was rejected.
    #[error("ER_ERR_202: Fee rate {rate} microperun exceeds one perun")]
    InvalidFeeRate { rate: u128 },

    // =================================================================
    // Order Lifecycle Errors (3xx)
    // =================================================================
    /// The requested order does not exist.
    #[error("ER_ERR_300: Order not found: {0}")]
    OrderNotFound(OrderId),

    /// An order with this id already exists (caller-supplied ids must be
    /// unique; a collision is an error, never a merge).
    #[error("ER_ERR_301: Order already exists: {0}")]
    DuplicateOrder(OrderId),

    /// The transition is illegal in the order's current state.
    #[error("ER_ERR_302: Invalid order state: expected {expected}, got {actual}")]
    InvalidOrderState {
        expected: OrderStatus,
        actual: OrderStatus,
    },

    /// The attached value does not cover the required escrow.
    #[error("ER_ERR_303: Insufficient attached value: required more than {required}, attached {attached}")]
    InsufficientValue { required: u128, attached: u128 },

    // =================================================================
    // Escrow / Accounting Errors (4xx)
    // =================================================================
    /// A transfer exceeds the funds held at the debited address.
    #[error("ER_ERR_400: Insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: u128, available: u128 },

    /// Checked arithmetic exceeded the fixed-precision bound. Fails
    /// closed, never wraps.
    #[error("ER_ERR_401: Arithmetic overflow")]
    Overflow,

    // =================================================================
    // Authorization Errors (5xx)
    // =================================================================
    /// The caller is not permitted to perform this transition.
    #[error("ER_ERR_500: Unauthorized caller: {caller}")]
    Unauthorized { caller: Address },

    // =================================================================
    // Document Store Errors (6xx)
    // =================================================================
    /// No blob is stored under this content hash.
    #[error("ER_ERR_600: Document missing: {0}")]
    DocumentMissing(ContentHash),

    /// The stored blob does not hash to the recorded content hash.
    #[error("ER_ERR_601: Content hash mismatch: expected {expected}, got {actual}")]
    HashMismatch {
        expected: ContentHash,
        actual: ContentHash,
    },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error. Aborts the whole transition.
    #[error("ER_ERR_900: Internal error: {0}")]
    Internal(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_code() {
        let err = RegistryError::OrderNotFound(OrderId::from_bytes([1; 32]));
        let msg = format!("{err}");
        assert!(msg.starts_with("ER_ERR_300"), "Got: {msg}");
    }

    #[test]
    fn insufficient_funds_display() {
        let err = RegistryError::InsufficientFunds {
            needed: 100,
            available: 50,
        };
        let msg = format!("{err}");
        assert!(msg.contains("ER_ERR_400"));
        assert!(msg.contains("100"));
        assert!(msg.contains("50"));
    }

    #[test]
    fn invalid_state_display() {
        let err = RegistryError::InvalidOrderState {
            expected: OrderStatus::Created,
            actual: OrderStatus::Shipped,
        };
        let msg = format!("{err}");
        assert!(msg.contains("ER_ERR_302"));
        assert!(msg.contains("CREATED"));
        assert!(msg.contains("SHIPPED"));
    }

    #[test]
    fn all_errors_have_er_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(RegistryError::InvalidStoreId {
                reason: "test".into(),
            }),
            Box::new(RegistryError::UnknownCurrency(
                CurrencyCode::parse("USD6").unwrap(),
            )),
            Box::new(RegistryError::Overflow),
            Box::new(RegistryError::Unauthorized {
                caller: Address::from_bytes([0; 20]),
            }),
            Box::new(RegistryError::Internal("test".into())),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("ER_ERR_"),
                "Error missing ER_ERR_ prefix: {msg}"
            );
        }
    }
}
