//! # Domain Types
//!
//! Core domain types for the cart engine.
//!
//! ## Type Relationship
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────┐          add(meta)        ┌──────────────────┐   │
//! │  │ ProductMetadata  │ ────────────────────────► │     LineItem     │   │
//! │  │  ──────────────  │   quantity assigned by    │  ──────────────  │   │
//! │  │  id              │   the engine, never by    │  id              │   │
//! │  │  title           │   the caller              │  title           │   │
//! │  │  image_url       │                           │  image_url       │   │
//! │  │  price           │                           │  price           │   │
//! │  └──────────────────┘                           │  quantity (>= 1) │   │
//! │                                                 └──────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialized Form
//! Field names are kept exactly as they appear in the persisted blob
//! (`id`, `title`, `image_url`, `price`, `quantity`) so blobs written by
//! earlier versions of the cart keep decoding.

use serde::{Deserialize, Serialize};

use crate::error::{CartError, CartResult};

// =============================================================================
// Product Metadata
// =============================================================================

/// Caller-supplied description of a product being added to the cart.
///
/// ## Why No Quantity Field?
/// Quantity is engine-assigned: a first add starts at 1, repeat adds
/// increment. Callers never choose a quantity directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductMetadata {
    /// External product identifier - the lookup and deduplication key.
    pub id: String,

    /// Display title, carried through unmodified.
    pub title: String,

    /// Display image URL, carried through unmodified.
    pub image_url: String,

    /// Unit price. Opaque to the engine: never validated, never computed on.
    /// Pricing, tax and totals belong to whatever consumes the snapshot.
    pub price: f64,
}

impl ProductMetadata {
    /// Validates the metadata before it enters the cart.
    ///
    /// ## Returns
    /// * `Ok(())` - metadata is usable
    /// * `Err(CartError::MissingId)` - the id is empty
    ///
    /// Title, image URL and price are intentionally unchecked: they are
    /// opaque display data and a non-positive price is accepted as-is.
    pub fn validate(&self) -> CartResult<()> {
        if self.id.is_empty() {
            return Err(CartError::MissingId);
        }
        Ok(())
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product's entry in the cart.
///
/// ## Invariant
/// `quantity >= 1` whenever the item is present in a [`Cart`](crate::Cart).
/// A decrement that would reach zero removes the entry instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// External product identifier (unique within a cart).
    pub id: String,

    /// Display title at time of adding.
    pub title: String,

    /// Display image URL at time of adding.
    pub image_url: String,

    /// Unit price at time of adding. Opaque display data.
    pub price: f64,

    /// Quantity in cart. Always at least 1.
    pub quantity: u32,
}

impl LineItem {
    /// Creates a fresh line item from product metadata with quantity 1.
    pub fn from_metadata(meta: ProductMetadata) -> Self {
        LineItem {
            id: meta.id,
            title: meta.title,
            image_url: meta.image_url,
            price: meta.price,
            quantity: 1,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
