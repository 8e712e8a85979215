//! # satchel-core: Pure Cart Logic for Satchel
//!
//! This crate is the **heart** of Satchel. It contains the cart model and its
//! mutation semantics as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Satchel Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 UI binding layer (out of scope)                 │   │
//! │  │        subscribes to snapshots, invokes mutations               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    satchel-store (engine)                       │   │
//! │  │        load on open, mutate, notify, persist in order           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ satchel-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   cart    │  │   codec   │  │   error   │  │   │
//! │  │   │ LineItem  │  │   Cart    │  │  encode   │  │ CartError │  │   │
//! │  │   │ Metadata  │  │ mutations │  │  decode   │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCKS • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types ([`ProductMetadata`], [`LineItem`])
//! - [`cart`] - The [`Cart`] sequence and its three mutations
//! - [`codec`] - The persisted blob format (JSON array of line items)
//! - [`error`] - Typed cart errors
//!
//! ## Invariants
//!
//! 1. **Quantity floor**: every item present in a cart has `quantity >= 1`;
//!    decrementing to zero removes the entry instead of keeping a zero row
//! 2. **Unique ids**: no two entries share an id; adding an existing id
//!    increments its quantity instead of duplicating
//! 3. **Round trip**: `decode(encode(cart))` reconstructs an equal cart
//!
//! ## Example Usage
//!
//! ```rust
//! use satchel_core::{Cart, ProductMetadata};
//!
//! let mut cart = Cart::new();
//! cart.add(ProductMetadata {
//!     id: "p1".into(),
//!     title: "Shirt".into(),
//!     image_url: "https://example.com/shirt.png".into(),
//!     price: 10.0,
//! });
//!
//! assert_eq!(cart.len(), 1);
//! assert_eq!(cart.get("p1").map(|i| i.quantity), Some(1));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod codec;
pub mod error;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use satchel_core::Cart` instead of
// `use satchel_core::cart::Cart`

pub use cart::{AddOutcome, Cart, DecrementOutcome};
pub use error::{CartError, CartResult};
pub use types::{LineItem, ProductMetadata};
