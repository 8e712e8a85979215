//! # Engine Error Types
//!
//! What callers of the cart store see.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  CartError (satchel-core) ──► StoreError::Input                        │
//! │  KvError (satchel-kv)     ──► StoreError::Load (open only)             │
//! │                                                                         │
//! │  Write failures after open are NOT errors to the caller: in-memory     │
//! │  state stays authoritative, the failure is logged and counted, and     │
//! │  the next successful write converges storage.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use satchel_core::CartError;
use satchel_kv::KvError;

/// Cart store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A [`CartHandle`](crate::CartHandle) was used after its owning store
    /// was dropped or closed.
    ///
    /// ## When This Occurs
    /// - A UI layer kept a handle alive past the store's lifetime
    ///
    /// This is a programmer contract violation, not a runtime condition to
    /// recover from: it fails fast and distinguishably rather than serving a
    /// silent default.
    #[error("cart accessed outside its store scope")]
    ScopeEnded,

    /// Caller-supplied input was rejected (e.g. metadata without an id).
    #[error("invalid cart input: {0}")]
    Input(#[from] CartError),

    /// The load step could not read from storage.
    ///
    /// Deliberately fatal at open: falling back to an empty cart over
    /// storage that holds data but momentarily fails to read would clobber
    /// a live cart on the next write. A *corrupt* blob, by contrast, falls
    /// back to empty with a diagnostic.
    #[error("failed to load persisted cart: {0}")]
    Load(#[from] KvError),

    /// The store has been closed; no further mutations are accepted.
    #[error("cart store is closed")]
    Closed,
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
