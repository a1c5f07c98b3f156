use std::str::FromStr;

use async_trait::async_trait;
use maxibot_core::Product;
use rust_decimal::Decimal;
use sqlx::{sqlite::SqliteRow, Row};

use super::{ProductRepository, RepositoryError};
use crate::DbPool;

pub struct SqlProductRepository {
    pool: DbPool,
}

impl SqlProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for SqlProductRepository {
    /// Catalog order is insertion order, carried by the `position` column.
    async fn list_products(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT name, description, price, stock FROM products ORDER BY position",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(product_from_row).collect()
    }
}

fn product_from_row(row: SqliteRow) -> Result<Product, RepositoryError> {
    let price_raw: String = row.try_get("price")?;
    let price = Decimal::from_str(&price_raw)
        .map_err(|err| RepositoryError::Decode(format!("invalid price `{price_raw}`: {err}")))?;

    Ok(Product {
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        price,
        stock: row.try_get("stock")?,
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{connect_with_settings, migrations::run_pending};

    async fn test_pool() -> DbPool {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        run_pending(&pool).await.expect("run migrations");
        pool
    }

    async fn insert_product(pool: &DbPool, name: &str, price: &str, position: i64) {
        sqlx::query(
            "INSERT INTO products (name, description, price, stock, position) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(name)
        .bind(format!("Descripción de {name}"))
        .bind(price)
        .bind(40_i64)
        .bind(position)
        .execute(pool)
        .await
        .expect("insert product");
    }

    #[tokio::test]
    async fn lists_catalog_in_insertion_order() {
        let pool = test_pool().await;
        // Alphabetical order would put JUMBO first; insertion order must win.
        insert_product(&pool, "Bolsa chica", "180", 1).await;
        insert_product(&pool, "Bolsa mediana", "250", 2).await;
        insert_product(&pool, "Bolsa JUMBO", "340", 3).await;

        let repo = SqlProductRepository::new(pool);
        let products = repo.list_products().await.expect("list products");

        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Bolsa chica", "Bolsa mediana", "Bolsa JUMBO"]);
        assert_eq!(products[2].price, dec!(340));
    }

    #[tokio::test]
    async fn invalid_price_surfaces_as_decode_error() {
        let pool = test_pool().await;
        insert_product(&pool, "Bolsa rota", "not-a-price", 1).await;

        let repo = SqlProductRepository::new(pool);
        let error = repo.list_products().await.expect_err("decode should fail");

        assert!(matches!(error, RepositoryError::Decode(_)));
    }
}
