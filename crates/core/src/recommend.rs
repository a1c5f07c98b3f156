//! Recommendation selection: rejection-aware filtering plus at most one
//! text-driven refinement, truncated to a short list.

use std::collections::BTreeSet;

use crate::domain::message::Message;
use crate::domain::product::Product;

/// Upper bound on the shortlist handed to the prompt composer.
pub const MAX_RECOMMENDATIONS: usize = 2;

/// Concatenated lower-cased text of the whole window, the input the
/// refinement rules match against.
pub fn window_text(window: &[Message]) -> String {
    window.iter().map(|message| message.text.to_lowercase()).collect::<Vec<_>>().join(" ")
}

/// Selects up to [`MAX_RECOMMENDATIONS`] products in catalog order.
///
/// Rejected products are dropped first, then exactly one refinement applies,
/// by precedence: a size cue keeps "grande" variants, a toughness cue keeps
/// "gruesa" variants, and a price cue re-sorts ascending by price (stable, so
/// equal prices keep catalog order). A refinement that filters everything out
/// yields an empty list; callers render that as "no compatible suggestions".
pub fn recommend(
    products: &[Product],
    rejected: &BTreeSet<String>,
    window_text: &str,
) -> Vec<Product> {
    let text = window_text.to_lowercase();
    let mut candidates: Vec<Product> = products
        .iter()
        .filter(|product| !rejected.contains(&product.name_key()))
        .cloned()
        .collect();

    if text.contains("pequeño") || text.contains("más chico") {
        candidates.retain(|product| product.name_key().contains("grande"));
    } else if text.contains("gruesa") || text.contains("resistente") {
        candidates.retain(|product| product.name_key().contains("gruesa"));
    } else if text.contains("barato") {
        candidates.sort_by_key(|product| product.price);
    }

    candidates.truncate(MAX_RECOMMENDATIONS);
    candidates
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::{recommend, MAX_RECOMMENDATIONS};
    use crate::domain::product::Product;

    fn product(name: &str, price: Decimal) -> Product {
        Product { name: name.to_string(), description: None, price, stock: 20 }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("Bolsa Negra Jumbo", dec!(340)),
            product("Bolsa Gruesa Calibre 200", dec!(320)),
            product("Bolsa Grande Reforzada", dec!(340)),
        ]
    }

    #[test]
    fn empty_history_returns_first_two_in_catalog_order() {
        let picks = recommend(&catalog(), &BTreeSet::new(), "");
        let names: Vec<&str> = picks.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Bolsa Negra Jumbo", "Bolsa Gruesa Calibre 200"]);
    }

    #[test]
    fn rejected_products_never_appear() {
        let mut rejected = BTreeSet::new();
        rejected.insert("bolsa negra jumbo".to_string());

        let picks = recommend(&catalog(), &rejected, "");
        assert!(picks.iter().all(|p| p.name_key() != "bolsa negra jumbo"));
        assert!(picks.len() <= MAX_RECOMMENDATIONS);
    }

    #[test]
    fn barato_sorts_ascending_with_stable_ties() {
        let products = vec![
            product("A", dec!(340)),
            product("B", dec!(320)),
            product("C", dec!(340)),
        ];

        let picks = recommend(&products, &BTreeSet::new(), "algo más barato");
        let names: Vec<&str> = picks.iter().map(|p| p.name.as_str()).collect();
        // B is cheapest; A beats C on the tie because it comes first in the catalog.
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn size_cue_keeps_only_grande_variants() {
        let picks = recommend(&catalog(), &BTreeSet::new(), "tienes algo más chico?");
        let names: Vec<&str> = picks.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Bolsa Grande Reforzada"]);
    }

    #[test]
    fn toughness_cue_keeps_only_gruesa_variants() {
        let picks = recommend(&catalog(), &BTreeSet::new(), "necesito una resistente");
        let names: Vec<&str> = picks.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Bolsa Gruesa Calibre 200"]);
    }

    #[test]
    fn size_cue_takes_precedence_over_price_cue() {
        let picks = recommend(&catalog(), &BTreeSet::new(), "algo pequeño y barato");
        let names: Vec<&str> = picks.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Bolsa Grande Reforzada"]);
    }

    #[test]
    fn refinement_may_empty_the_shortlist() {
        let products = vec![product("Bolsa Mediana", dec!(200))];
        let picks = recommend(&products, &BTreeSet::new(), "algo pequeño");
        assert!(picks.is_empty());
    }

    #[test]
    fn output_never_exceeds_bound() {
        let products: Vec<Product> =
            (0..6).map(|i| product(&format!("Bolsa {i}"), dec!(100))).collect();
        assert!(recommend(&products, &BTreeSet::new(), "").len() <= MAX_RECOMMENDATIONS);
    }
}
