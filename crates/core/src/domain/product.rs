use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Catalog entry. The name doubles as the record key; all matching against
/// conversation text happens on the lower-cased [`Product::name_key`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i64,
}

impl Product {
    /// Case-insensitive key used for rejection and recommendation matching.
    pub fn name_key(&self) -> String {
        self.name.to_lowercase()
    }
}
