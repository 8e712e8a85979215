//! # satchel-store: The Cart Store Engine
//!
//! The authoritative owner of cart state. It loads any previously persisted
//! cart on open, applies mutations under the invariants of `satchel-core`,
//! publishes a fresh snapshot to subscribers after every mutation, and
//! mirrors every mutation to durable storage in mutation order.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Satchel Engine                                   │
//! │                                                                         │
//! │  UI binding layer                                                      │
//! │    CartHandle ──► add_to_cart / increment / decrement                  │
//! │    watch::Receiver<CartSnapshot> ◄── one snapshot per mutation         │
//! │                       │                                                 │
//! │  ┌────────────────────▼────────────────────────────────────────────┐   │
//! │  │                 CartStore (THIS CRATE)                          │   │
//! │  │                                                                 │   │
//! │  │   open ──► load blob ──► Cart (satchel-core)                    │   │
//! │  │                                                                 │   │
//! │  │   mutation:  lock ─► mutate ─► publish ─► enqueue ─► unlock     │   │
//! │  │                                              │                  │   │
//! │  │                                   ┌──────────▼──────────┐       │   │
//! │  │                                   │   PersistWriter     │       │   │
//! │  │                                   │  FIFO, one write    │       │   │
//! │  │                                   │  in flight at a time│       │   │
//! │  │                                   └──────────┬──────────┘       │   │
//! │  └──────────────────────────────────────────────┼──────────────────┘   │
//! │                                                 ▼                      │
//! │                              KvStore (satchel-kv)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`engine`] - [`CartStore`], [`CartHandle`], [`StoreConfig`]
//! - [`writer`] - the background persist writer
//! - [`error`] - engine error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use satchel_core::ProductMetadata;
//! use satchel_kv::{KvConfig, SqliteKvStore};
//! use satchel_store::{CartStore, StoreConfig};
//!
//! let kv = Arc::new(SqliteKvStore::connect(KvConfig::new("satchel.db")).await?);
//! let store = CartStore::open(kv, StoreConfig::default()).await?;
//!
//! store.add_to_cart(ProductMetadata {
//!     id: "p1".into(),
//!     title: "Shirt".into(),
//!     image_url: "https://example.com/shirt.png".into(),
//!     price: 10.0,
//! }).await?;
//!
//! let mut updates = store.subscribe();
//! // updates.changed().await — one notification per completed mutation
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod engine;
pub mod error;
mod writer;

// =============================================================================
// Re-exports
// =============================================================================

pub use engine::{CartHandle, CartSnapshot, CartStore, StoreConfig, DEFAULT_STORAGE_KEY};
pub use error::{StoreError, StoreResult};
