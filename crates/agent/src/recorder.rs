use std::sync::Arc;

use chrono::Utc;
use maxibot_core::{first_phone_run, Order, Product};
use maxibot_db::{OrderRepository, RepositoryError};
use tracing::info;
use uuid::Uuid;

/// Product name recorded when the customer sends delivery data before any
/// recommendation has been made.
pub const UNKNOWN_PRODUCT: &str = "producto desconocido";

#[derive(Debug)]
pub enum OrderOutcome {
    /// A new order was written for this customer.
    Recorded(Order),
    /// The customer already has an order on file; nothing was written.
    AlreadyActive(Order),
}

impl OrderOutcome {
    pub fn order(&self) -> &Order {
        match self {
            Self::Recorded(order) | Self::AlreadyActive(order) => order,
        }
    }
}

/// Writes at most one order per customer from a delivery-data utterance.
///
/// Precondition: the caller has already detected delivery data in the
/// utterance. The recorder checks only for an existing order.
pub struct OrderRecorder {
    orders: Arc<dyn OrderRepository>,
}

impl OrderRecorder {
    pub fn new(orders: Arc<dyn OrderRepository>) -> Self {
        Self { orders }
    }

    /// Records an order unless the customer already has one.
    ///
    /// Two concurrent captures for the same customer can both pass the
    /// existence check and both insert; the window is one webhook turn and a
    /// duplicate order is an accepted outcome.
    pub async fn capture(
        &self,
        customer_id: &str,
        utterance: &str,
        recommendations: &[Product],
    ) -> Result<OrderOutcome, RepositoryError> {
        if let Some(existing) = self.orders.latest_order(customer_id).await? {
            return Ok(OrderOutcome::AlreadyActive(existing));
        }

        let chosen = recommendations.first();
        let order = Order {
            id: Uuid::new_v4().to_string(),
            customer_id: customer_id.to_string(),
            product_name: chosen
                .map(|product| product.name.clone())
                .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string()),
            address: utterance.to_string(),
            phone: first_phone_run(utterance).unwrap_or_default(),
            total: chosen.map(|product| product.price),
            created_at: Utc::now(),
        };

        self.orders.create_order(&order).await?;
        info!(
            customer_id,
            order_id = %order.id,
            product_name = %order.product_name,
            event_name = "order_recorded",
            "recorded delivery order"
        );

        Ok(OrderOutcome::Recorded(order))
    }
}
