//! Fixed-width identifiers used throughout EscrowReg.
//!
//! Every persisted entity is keyed by a fixed-width binary value: addresses
//! are 20 bytes, order ids and content hashes 32 bytes, currency codes
//! 4 bytes. Store identifiers are human-readable but bounded by their
//! 32-byte storage key and validated against a strict grammar.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{CURRENCY_CODE_LEN, MAX_STORE_ID_LEN};
use crate::error::{RegistryError, Result};

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A ledger account identity (20 raw bytes, supplied by the ledger
/// execution environment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Address(pub [u8; 20]);

impl Address {
    #[must_use]
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Short hex form for log fields.
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

// ---------------------------------------------------------------------------
// OrderId
// ---------------------------------------------------------------------------

/// Caller-supplied order identifier (32 raw bytes). Must be unique per
/// order; the registry rejects collisions rather than deduplicating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OrderId(pub [u8; 32]);

impl OrderId {
    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ord:{}", hex::encode(&self.0[..8]))
    }
}

// ---------------------------------------------------------------------------
// ContentHash
// ---------------------------------------------------------------------------

/// SHA-256 digest binding an off-registry metadata blob to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ContentHash(pub [u8; 32]);

impl ContentHash {
    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

// ---------------------------------------------------------------------------
// CurrencyCode
// ---------------------------------------------------------------------------

/// Fixed-width currency tag, e.g. `"USD6"`. Stored as 4 bytes, shorter
/// codes right-padded with zero bytes so the key width is constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CurrencyCode(pub [u8; 4]);

impl CurrencyCode {
    /// Parse a currency code from its ASCII form.
    ///
    /// # Errors
    /// Returns `InvalidCurrencyCode` if the code is empty, longer than
    /// [`CURRENCY_CODE_LEN`] bytes, or contains non-graphic ASCII.
    pub fn parse(code: &str) -> Result<Self> {
        if code.is_empty() {
            return Err(RegistryError::InvalidCurrencyCode {
                reason: "empty code".to_string(),
            });
        }
        if code.len() > CURRENCY_CODE_LEN {
            return Err(RegistryError::InvalidCurrencyCode {
                reason: format!("{} bytes exceeds width {CURRENCY_CODE_LEN}", code.len()),
            });
        }
        if !code.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(RegistryError::InvalidCurrencyCode {
                reason: "non-graphic ASCII byte".to_string(),
            });
        }
        let mut bytes = [0u8; 4];
        bytes[..code.len()].copy_from_slice(code.as_bytes());
        Ok(Self(bytes))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let end = self.0.iter().position(|&b| b == 0).unwrap_or(4);
        for &b in &self.0[..end] {
            write!(f, "{}", b as char)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// StoreId
// ---------------------------------------------------------------------------

/// A validated store identifier.
///
/// The grammar is strict because identifiers double as lookup keys and
/// display text: non-empty, at most [`MAX_STORE_ID_LEN`] bytes, and
/// composed only of lowercase ASCII letters, digits, and underscore. NUL
/// bytes, whitespace, and uppercase are all rejected, so two distinct ids
/// never compare equal under case-folding and never truncate at an
/// embedded NUL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct StoreId(String);

impl StoreId {
    /// Validate and construct a store identifier. This is the single
    /// validation point: a `StoreId` value is valid by construction.
    ///
    /// # Errors
    /// Returns `InvalidStoreId` naming the first rule violated.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(RegistryError::InvalidStoreId {
                reason: "empty identifier".to_string(),
            });
        }
        if raw.len() > MAX_STORE_ID_LEN {
            return Err(RegistryError::InvalidStoreId {
                reason: format!("{} bytes exceeds maximum {MAX_STORE_ID_LEN}", raw.len()),
            });
        }
        for b in raw.bytes() {
            match b {
                b'a'..=b'z' | b'0'..=b'9' | b'_' => {}
                0 => {
                    return Err(RegistryError::InvalidStoreId {
                        reason: "embedded NUL byte".to_string(),
                    });
                }
                b' ' | b'\t' | b'\n' | b'\r' => {
                    return Err(RegistryError::InvalidStoreId {
                        reason: "whitespace".to_string(),
                    });
                }
                b'A'..=b'Z' => {
                    return Err(RegistryError::InvalidStoreId {
                        reason: "uppercase letter".to_string(),
                    });
                }
                other => {
                    return Err(RegistryError::InvalidStoreId {
                        reason: format!("illegal byte 0x{other:02x}"),
                    });
                }
            }
        }
        Ok(Self(raw.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
