use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Captured delivery commitment. Rows are append-only; the "active" order for
/// a customer is the most recently created row, resolved at query time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub customer_id: String,
    pub product_name: String,
    pub address: String,
    pub phone: String,
    pub total: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}
