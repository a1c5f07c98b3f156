//! Rejection detection over the conversation window.
//!
//! A customer rejects a product by negating it in a user message. Once a
//! product is rejected anywhere in the window it stays rejected; there is no
//! un-rejection phrase.

use std::collections::BTreeSet;

use crate::domain::message::{Message, MessageRole};
use crate::domain::product::Product;

/// Colloquial shorthand tokens that reject every product whose name contains
/// "jumbo", even when the catalog name never appears verbatim in the message.
/// A special rule for one recurring phrasing, separate from the general
/// pattern loop below.
pub const JUMBO_SHORTHANDS: [&str; 2] = ["no quiero jumbo", "no jumbo"];

/// Computes the set of rejected product name keys from the message window.
/// Only user turns are inspected. Keys are lower-cased product names.
pub fn rejection_set(window: &[Message], products: &[Product]) -> BTreeSet<String> {
    let mut rejected = BTreeSet::new();

    for message in window.iter().filter(|message| message.role == MessageRole::User) {
        let text = message.text.to_lowercase();

        for product in products {
            let key = product.name_key();
            if negation_patterns(&key).iter().any(|pattern| text.contains(pattern)) {
                rejected.insert(key);
            }
        }

        rejected.extend(jumbo_shorthand_rejections(&text, products));
    }

    rejected
}

fn negation_patterns(name_key: &str) -> [String; 3] {
    [
        format!("no quiero {name_key}"),
        format!("otra que no sea {name_key}"),
        format!("no {name_key}"),
    ]
}

fn jumbo_shorthand_rejections(lowered_text: &str, products: &[Product]) -> Vec<String> {
    if !JUMBO_SHORTHANDS.iter().any(|shorthand| lowered_text.contains(shorthand)) {
        return Vec::new();
    }

    products
        .iter()
        .map(Product::name_key)
        .filter(|key| key.contains("jumbo"))
        .collect()
}
