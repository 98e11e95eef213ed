//! Store record model.

use serde::{Deserialize, Serialize};

use crate::{Address, ContentHash, StoreId};

/// A registered store identity.
///
/// Created exactly once per unique [`StoreId`] and immutable thereafter.
/// `metadata_hash` is the content hash of the metadata blob supplied at
/// registration; the blob itself lives in the document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreRecord {
    pub id: StoreId,
    pub owner: Address,
    pub metadata_hash: ContentHash,
}
