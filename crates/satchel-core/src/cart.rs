//! # Cart Model
//!
//! The ordered, id-unique sequence of line items and its three mutations.
//!
//! ## Mutation Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Mutations                                     │
//! │                                                                         │
//! │  add(meta)          id in cart? ──yes──► quantity += 1                 │
//! │                          │                                              │
//! │                          no ───────────► push {meta, quantity: 1}      │
//! │                                          (appended at the tail)        │
//! │                                                                         │
//! │  increment(id)      id in cart? ──yes──► quantity += 1                 │
//! │                          │                                              │
//! │                          no ───────────► no-op                         │
//! │                                                                         │
//! │  decrement(id)      id in cart? ──yes──► quantity -= 1                 │
//! │                          │                    │                         │
//! │                          no ──► no-op         └── reaches 0? remove    │
//! │                                                   entry in place       │
//! │                                                                         │
//! │  INVARIANTS:                                                            │
//! │  • quantity >= 1 for every present entry                               │
//! │  • ids unique (add on existing id increments, never duplicates)        │
//! │  • insertion order preserved; removal deletes in place                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use crate::error::{CartError, CartResult};
use crate::types::{LineItem, ProductMetadata};

// =============================================================================
// Mutation Outcomes
// =============================================================================

/// Outcome of [`Cart::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The id was not in the cart; a new entry was appended with quantity 1.
    Added,
    /// The id was already in the cart; its quantity was incremented.
    Incremented,
}

/// Outcome of [`Cart::decrement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecrementOutcome {
    /// Quantity went from above 1 to one less.
    Decremented,
    /// Quantity was 1; the entry was removed from the sequence.
    Removed,
    /// The id was not in the cart; nothing changed.
    NotFound,
}

// =============================================================================
// Cart
// =============================================================================

/// The cart: an ordered sequence of [`LineItem`], unique by id.
///
/// ## Invariants
/// - Every entry has `quantity >= 1` (quantity reaching 0 removes the entry)
/// - No two entries share an id (adding an existing id increments it)
/// - Insertion order is preserved; removal deletes in place without
///   reordering the remaining items
///
/// Deserialization deliberately goes through [`Cart::from_items`] (see the
/// [`codec`](crate::codec) module) so a decoded blob cannot bypass the
/// invariant checks.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Rebuilds a cart from already-materialized line items.
    ///
    /// ## When To Call
    /// After decoding a persisted blob. The items are checked against the
    /// cart invariants because the blob may have been written by something
    /// other than this engine.
    ///
    /// ## Returns
    /// * `Ok(Cart)` - items satisfy the invariants
    /// * `Err(CartError::DuplicateId)` - two items share an id
    /// * `Err(CartError::ZeroQuantity)` - an item has quantity 0
    pub fn from_items(items: Vec<LineItem>) -> CartResult<Self> {
        for (i, item) in items.iter().enumerate() {
            if item.quantity == 0 {
                return Err(CartError::ZeroQuantity {
                    id: item.id.clone(),
                });
            }
            if items[..i].iter().any(|other| other.id == item.id) {
                return Err(CartError::DuplicateId {
                    id: item.id.clone(),
                });
            }
        }
        Ok(Cart { items })
    }

    /// Adds a product to the cart or increments its quantity if present.
    ///
    /// ## Behavior
    /// - Id already in cart: `quantity += 1`, all other fields unchanged
    ///   (the stored title/image/price stay frozen at first-add values)
    /// - Id not in cart: appended at the tail with quantity 1
    pub fn add(&mut self, meta: ProductMetadata) -> AddOutcome {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == meta.id) {
            item.quantity += 1;
            return AddOutcome::Incremented;
        }

        self.items.push(LineItem::from_metadata(meta));
        AddOutcome::Added
    }

    /// Increments the quantity of an item by id.
    ///
    /// ## Returns
    /// * `true` - the item was found and incremented
    /// * `false` - no such id; the cart is unchanged
    pub fn increment(&mut self, id: &str) -> bool {
        match self.items.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                item.quantity += 1;
                true
            }
            None => false,
        }
    }

    /// Decrements the quantity of an item by id.
    ///
    /// ## Behavior
    /// - Quantity above 1: decremented in place
    /// - Quantity exactly 1: the entry is removed from the sequence (a
    ///   zero-quantity row is never retained)
    /// - Id not present: no-op
    pub fn decrement(&mut self, id: &str) -> DecrementOutcome {
        let Some(index) = self.items.iter().position(|i| i.id == id) else {
            return DecrementOutcome::NotFound;
        };

        if self.items[index].quantity <= 1 {
            self.items.remove(index);
            DecrementOutcome::Removed
        } else {
            self.items[index].quantity -= 1;
            DecrementOutcome::Decremented
        }
    }

    /// Returns the line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Looks up a line item by id.
    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Returns the number of distinct line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(id: &str) -> ProductMetadata {
        ProductMetadata {
            id: id.to_string(),
            title: format!("Product {}", id),
            image_url: format!("https://example.com/{}.png", id),
            price: 10.0,
        }
    }

    fn assert_invariants(cart: &Cart) {
        for (i, item) in cart.items().iter().enumerate() {
            assert!(item.quantity >= 1, "zero-quantity row retained");
            assert!(
                !cart.items()[..i].iter().any(|o| o.id == item.id),
                "duplicate id {}",
                item.id
            );
        }
    }

    #[test]
    fn test_add_new_item_starts_at_one() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(meta("p1")), AddOutcome::Added);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("p1").unwrap().quantity, 1);
        assert_eq!(cart.get("p1").unwrap().title, "Product p1");
    }

    #[test]
    fn test_add_existing_id_increments_instead_of_duplicating() {
        let mut cart = Cart::new();
        cart.add(meta("p1"));
        cart.add(meta("p1"));
        assert_eq!(cart.add(meta("p1")), AddOutcome::Incremented);

        // Exactly one entry, quantity equals the call count.
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("p1").unwrap().quantity, 3);
    }

    #[test]
    fn test_add_on_existing_id_keeps_first_metadata() {
        let mut cart = Cart::new();
        cart.add(meta("p1"));

        let changed = ProductMetadata {
            title: "Renamed".to_string(),
            price: 99.0,
            ..meta("p1")
        };
        cart.add(changed);

        let item = cart.get("p1").unwrap();
        assert_eq!(item.quantity, 2);
        assert_eq!(item.title, "Product p1");
        assert_eq!(item.price, 10.0);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        cart.add(meta("p1"));
        cart.add(meta("p2"));
        cart.add(meta("p3"));
        cart.add(meta("p2")); // repeat add must not reorder

        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "p3"]);
    }

    #[test]
    fn test_increment_existing() {
        let mut cart = Cart::new();
        cart.add(meta("p1"));

        assert!(cart.increment("p1"));
        assert_eq!(cart.get("p1").unwrap().quantity, 2);
    }

    #[test]
    fn test_increment_unknown_is_noop() {
        let mut cart = Cart::new();
        cart.add(meta("p1"));

        assert!(!cart.increment("nope"));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("p1").unwrap().quantity, 1);
    }

    #[test]
    fn test_decrement_above_one() {
        let mut cart = Cart::new();
        cart.add(meta("p1"));
        cart.add(meta("p1"));

        assert_eq!(cart.decrement("p1"), DecrementOutcome::Decremented);
        assert_eq!(cart.get("p1").unwrap().quantity, 1);
    }

    #[test]
    fn test_decrement_at_one_removes_entry() {
        let mut cart = Cart::new();
        cart.add(meta("p1"));

        assert_eq!(cart.decrement("p1"), DecrementOutcome::Removed);
        assert!(cart.is_empty());
        assert!(cart.get("p1").is_none());
    }

    #[test]
    fn test_decrement_unknown_is_noop() {
        let mut cart = Cart::new();
        assert_eq!(cart.decrement("ghost"), DecrementOutcome::NotFound);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_removal_deletes_in_place_without_reordering() {
        let mut cart = Cart::new();
        cart.add(meta("p1"));
        cart.add(meta("p2"));
        cart.add(meta("p3"));

        cart.decrement("p2");

        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p3"]);
    }

    #[test]
    fn test_repeat_add_then_decrement_scenario() {
        // add p1 twice, decrement p1 -> one entry at quantity 1
        let mut cart = Cart::new();
        cart.add(meta("p1"));
        cart.add(meta("p1"));
        cart.decrement("p1");

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("p1").unwrap().quantity, 1);
    }

    #[test]
    fn test_invariants_hold_over_mixed_mutation_sequence() {
        let mut cart = Cart::new();
        let ops: &[&dyn Fn(&mut Cart)] = &[
            &|c| {
                c.add(meta("p1"));
            },
            &|c| {
                c.add(meta("p2"));
            },
            &|c| {
                c.increment("p1");
            },
            &|c| {
                c.decrement("p2");
            },
            &|c| {
                c.decrement("p2"); // now absent
            },
            &|c| {
                c.add(meta("p2"));
            },
            &|c| {
                c.increment("missing");
            },
            &|c| {
                c.decrement("p1");
            },
            &|c| {
                c.add(meta("p3"));
            },
            &|c| {
                c.decrement("p1");
            },
        ];

        for op in ops {
            op(&mut cart);
            assert_invariants(&cart);
        }

        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["p2", "p3"]);
    }

    #[test]
    fn test_from_items_accepts_valid_sequence() {
        let mut source = Cart::new();
        source.add(meta("p1"));
        source.add(meta("p2"));
        source.increment("p2");

        let rebuilt = Cart::from_items(source.items().to_vec()).unwrap();
        assert_eq!(rebuilt, source);
    }

    #[test]
    fn test_from_items_rejects_duplicate_ids() {
        let item = LineItem::from_metadata(meta("p1"));
        let result = Cart::from_items(vec![item.clone(), item]);
        assert!(matches!(result, Err(CartError::DuplicateId { id }) if id == "p1"));
    }

    #[test]
    fn test_from_items_rejects_zero_quantity() {
        let mut item = LineItem::from_metadata(meta("p1"));
        item.quantity = 0;
        let result = Cart::from_items(vec![item]);
        assert!(matches!(result, Err(CartError::ZeroQuantity { id }) if id == "p1"));
    }
}
