//! # escrowreg-ledger
//!
//! Ledger-side collaborators the registry core computes against:
//!
//! 1. **TxContext**: the transaction envelope (caller, attached value,
//!    ledger clock) the execution environment supplies per transition
//! 2. **EscrowBook**: per-address value accounting with all-or-nothing
//!    batch transfers and fail-closed unsigned arithmetic
//! 3. **MetadataLinker**: binds opaque metadata blobs to records via
//!    SHA-256 content hashes
//! 4. **DocumentStore**: content-addressed blob persistence (trait +
//!    in-memory implementation)
//!
//! ## Transition Flow
//!
//! ```text
//! host → TxContext → registry transition → EscrowBook.apply()
//!      → DocumentStore.put() → durable record
//! ```
//!
//! Every transition is atomic: all transfers and record mutations commit
//! together or not at all.

pub mod book;
pub mod context;
pub mod docstore;
pub mod linker;

pub use book::{EscrowBook, Transfer, fee_of};
pub use context::TxContext;
pub use docstore::{DocumentStore, MemoryDocStore};
