//! # Error Types
//!
//! Typed errors for cart logic.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  satchel-core errors (this file)                                       │
//! │  └── CartError        - Invalid input or a blob that breaks invariants │
//! │                                                                         │
//! │  satchel-kv errors (separate crate)                                    │
//! │  └── KvError          - Storage operation failures                     │
//! │                                                                         │
//! │  satchel-store errors (separate crate)                                 │
//! │  └── StoreError       - What API callers see                           │
//! │                                                                         │
//! │  Flow: CartError ──► StoreError ──► caller                              │
//! │        KvError   ──► StoreError ──► caller                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (the offending id)
//! 3. Errors are enum variants, never String

use thiserror::Error;

/// Cart logic errors.
///
/// `MissingId` rejects malformed caller input; the remaining variants are
/// produced while decoding a persisted blob that violates cart invariants.
#[derive(Debug, Error)]
pub enum CartError {
    /// Caller-supplied product metadata has an empty id.
    ///
    /// ## When This Occurs
    /// - The UI layer passes product metadata without an identifier
    ///
    /// Ids are the lookup and deduplication key, so an item without one can
    /// never be incremented or removed again.
    #[error("product metadata is missing an id")]
    MissingId,

    /// A decoded blob contains two entries with the same id.
    #[error("duplicate line item id: {id}")]
    DuplicateId { id: String },

    /// A decoded blob contains an entry with quantity zero.
    ///
    /// ## When This Occurs
    /// - The blob was written by something other than this engine; a
    ///   zero-quantity row is never persisted because decrementing to zero
    ///   removes the entry
    #[error("line item {id} has zero quantity")]
    ZeroQuantity { id: String },

    /// The blob is not valid JSON for a line item sequence.
    #[error("cart blob is malformed: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CartError::MissingId.to_string(),
            "product metadata is missing an id"
        );

        let err = CartError::DuplicateId {
            id: "p1".to_string(),
        };
        assert_eq!(err.to_string(), "duplicate line item id: p1");

        let err = CartError::ZeroQuantity {
            id: "p2".to_string(),
        };
        assert_eq!(err.to_string(), "line item p2 has zero quantity");
    }
}
