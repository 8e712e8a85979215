//! # Blob Codec
//!
//! The persisted representation of a cart: a JSON array of line items.
//!
//! ## Blob Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Persisted Blob                                     │
//! │                                                                         │
//! │  [                                                                      │
//! │    { "id": "p1", "title": "Shirt",                                      │
//! │      "image_url": "https://…/shirt.png",                                │
//! │      "price": 10.0, "quantity": 2 },                                    │
//! │    { "id": "p2", … }                                                    │
//! │  ]                                                                      │
//! │                                                                         │
//! │  • Array order = cart insertion order                                   │
//! │  • Self-describing, human-inspectable                                   │
//! │  • Matches the historical cart blob layout byte-for-byte in field      │
//! │    naming, so old blobs keep loading                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Decoding re-checks the cart invariants via [`Cart::from_items`]; what to
//! do with a blob that fails (fall back to empty, surface the error) is the
//! engine's policy decision, not this module's.

use crate::cart::Cart;
use crate::error::CartResult;
use crate::types::LineItem;

/// Serializes a cart to its persisted blob form.
pub fn encode(cart: &Cart) -> CartResult<Vec<u8>> {
    Ok(serde_json::to_vec(cart.items())?)
}

/// Deserializes a persisted blob back into a cart.
///
/// ## Returns
/// * `Ok(Cart)` - the blob parsed and satisfies the cart invariants
/// * `Err(CartError::Codec)` - the bytes are not a valid line item array
/// * `Err(CartError::DuplicateId | ZeroQuantity)` - parsed, but the content
///   violates an invariant
pub fn decode(bytes: &[u8]) -> CartResult<Cart> {
    let items: Vec<LineItem> = serde_json::from_slice(bytes)?;
    Cart::from_items(items)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CartError;
    use crate::types::ProductMetadata;

    fn meta(id: &str, price: f64) -> ProductMetadata {
        ProductMetadata {
            id: id.to_string(),
            title: format!("Product {}", id),
            image_url: format!("https://example.com/{}.png", id),
            price,
        }
    }

    #[test]
    fn test_round_trip_preserves_items_and_order() {
        let mut cart = Cart::new();
        cart.add(meta("p1", 10.0));
        cart.add(meta("p2", 4.5));
        cart.add(meta("p1", 10.0));
        cart.add(meta("p3", 0.99));

        let blob = encode(&cart).unwrap();
        let decoded = decode(&blob).unwrap();

        assert_eq!(decoded, cart);
        let ids: Vec<&str> = decoded.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "p3"]);
        assert_eq!(decoded.get("p1").unwrap().quantity, 2);
    }

    #[test]
    fn test_empty_cart_encodes_to_empty_array() {
        let blob = encode(&Cart::new()).unwrap();
        assert_eq!(blob, b"[]");
        assert!(decode(&blob).unwrap().is_empty());
    }

    #[test]
    fn test_decodes_legacy_blob_layout() {
        // A blob in the historical format: plain array, snake_case fields.
        let blob = br#"[
            {"id":"p1","title":"Shirt","image_url":"https://x/s.png","price":10,"quantity":2},
            {"id":"p2","title":"Mug","image_url":"https://x/m.png","price":4.5,"quantity":1}
        ]"#;

        let cart = decode(blob).unwrap();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.get("p1").unwrap().quantity, 2);
        assert_eq!(cart.get("p2").unwrap().price, 4.5);
    }

    #[test]
    fn test_malformed_bytes_are_a_typed_error() {
        assert!(matches!(decode(b"not json"), Err(CartError::Codec(_))));
        // Valid JSON, wrong shape.
        assert!(matches!(decode(b"{\"id\":\"p1\"}"), Err(CartError::Codec(_))));
    }

    #[test]
    fn test_invariant_violations_are_rejected() {
        let dup = br#"[
            {"id":"p1","title":"A","image_url":"u","price":1,"quantity":1},
            {"id":"p1","title":"B","image_url":"u","price":1,"quantity":1}
        ]"#;
        assert!(matches!(decode(dup), Err(CartError::DuplicateId { .. })));

        let zero = br#"[{"id":"p1","title":"A","image_url":"u","price":1,"quantity":0}]"#;
        assert!(matches!(decode(zero), Err(CartError::ZeroQuantity { .. })));
    }
}
