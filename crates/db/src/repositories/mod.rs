pub mod memory;
pub mod message;
pub mod order;
pub mod product;

use async_trait::async_trait;
use maxibot_core::{Message, Order, Product};
use thiserror::Error;

pub use memory::{InMemoryMessageRepository, InMemoryOrderRepository, InMemoryProductRepository};
pub use message::SqlMessageRepository;
pub use order::SqlOrderRepository;
pub use product::SqlProductRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("stored row could not be decoded: {0}")]
    Decode(String),
}

/// Read access to the sales catalog.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, RepositoryError>;
}

/// Append-only per-customer conversation log.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Returns up to `limit` most recent messages for the customer, oldest
    /// first.
    async fn recent_messages(
        &self,
        customer_id: &str,
        limit: u32,
    ) -> Result<Vec<Message>, RepositoryError>;

    async fn append_message(&self, message: &Message) -> Result<(), RepositoryError>;
}

/// Captured delivery orders.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn latest_order(&self, customer_id: &str) -> Result<Option<Order>, RepositoryError>;

    async fn create_order(&self, order: &Order) -> Result<(), RepositoryError>;
}
