pub mod connection;
pub mod fixtures;
pub mod migrations;
pub mod repositories;

pub use connection::{connect, connect_with_settings, DbPool};
pub use fixtures::{SeedResult, VerificationResult};
pub use repositories::{
    InMemoryMessageRepository, InMemoryOrderRepository, InMemoryProductRepository,
    MessageRepository, OrderRepository, ProductRepository, RepositoryError, SqlMessageRepository,
    SqlOrderRepository, SqlProductRepository,
};
