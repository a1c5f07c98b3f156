//! In-memory repository fakes for engine and handler tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use maxibot_core::{Message, Order, Product};
use sqlx::Error as SqlxError;

use super::{MessageRepository, OrderRepository, ProductRepository, RepositoryError};

fn simulated_failure() -> RepositoryError {
    RepositoryError::Database(SqlxError::PoolClosed)
}

#[derive(Default)]
pub struct InMemoryProductRepository {
    products: Mutex<Vec<Product>>,
    fail_listing: AtomicBool,
}

impl InMemoryProductRepository {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products: Mutex::new(products), fail_listing: AtomicBool::new(false) }
    }

    pub fn fail_next_listings(&self, fail: bool) {
        self.fail_listing.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list_products(&self) -> Result<Vec<Product>, RepositoryError> {
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(simulated_failure());
        }

        let products = self.products.lock().map_err(|_| simulated_failure())?;
        Ok(products.clone())
    }
}

#[derive(Default)]
pub struct InMemoryMessageRepository {
    messages: Mutex<Vec<Message>>,
    fail_append: AtomicBool,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next_appends(&self, fail: bool) {
        self.fail_append.store(fail, Ordering::SeqCst);
    }

    pub fn all_messages(&self) -> Vec<Message> {
        self.messages.lock().map(|messages| messages.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn recent_messages(
        &self,
        customer_id: &str,
        limit: u32,
    ) -> Result<Vec<Message>, RepositoryError> {
        let messages = self.messages.lock().map_err(|_| simulated_failure())?;

        let mut window: Vec<Message> = messages
            .iter()
            .filter(|message| message.customer_id == customer_id)
            .cloned()
            .collect();
        window.sort_by(|a, b| a.sent_at.cmp(&b.sent_at));

        let excess = window.len().saturating_sub(limit as usize);
        Ok(window.split_off(excess))
    }

    async fn append_message(&self, message: &Message) -> Result<(), RepositoryError> {
        if self.fail_append.load(Ordering::SeqCst) {
            return Err(simulated_failure());
        }

        let mut messages = self.messages.lock().map_err(|_| simulated_failure())?;
        messages.push(message.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: Mutex<Vec<Order>>,
    writes: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_next_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful `create_order` calls, for idempotence assertions.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn all_orders(&self) -> Vec<Order> {
        self.orders.lock().map(|orders| orders.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn latest_order(&self, customer_id: &str) -> Result<Option<Order>, RepositoryError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(simulated_failure());
        }

        let orders = self.orders.lock().map_err(|_| simulated_failure())?;
        Ok(orders
            .iter()
            .filter(|order| order.customer_id == customer_id)
            .max_by_key(|order| order.created_at)
            .cloned())
    }

    async fn create_order(&self, order: &Order) -> Result<(), RepositoryError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(simulated_failure());
        }

        let mut orders = self.orders.lock().map_err(|_| simulated_failure())?;
        orders.push(order.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
