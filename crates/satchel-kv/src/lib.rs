//! # satchel-kv: Key-Value Storage Layer for Satchel
//!
//! This crate provides durable key-value storage for the cart engine.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Satchel Data Flow                                │
//! │                                                                         │
//! │  CartStore mutation (satchel-store)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    satchel-kv (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    KvStore    │    │ SqliteKvStore │    │  Migrations  │  │   │
//! │  │   │   (trait)     │◄───│  (sqlite.rs)  │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ get(key)      │    │ SqlitePool    │    │ 001_kv_store │  │   │
//! │  │   │ put(key, val) │◄───│ MemoryKvStore │    │   .sql       │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   kv_store(key TEXT PRIMARY KEY, value BLOB, updated_at TEXT)   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The [`KvStore`] trait and the in-memory implementation
//! - [`sqlite`] - SQLite-backed implementation with pooling and config
//! - [`migrations`] - Embedded schema migrations
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use satchel_kv::{KvConfig, KvStore, SqliteKvStore};
//!
//! let kv = SqliteKvStore::connect(KvConfig::new("satchel.db")).await?;
//! kv.put("products", b"[]").await?;
//! let blob = kv.get("products").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod sqlite;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{KvError, KvResult};
pub use sqlite::{KvConfig, SqliteKvStore};
pub use store::{KvStore, MemoryKvStore};
