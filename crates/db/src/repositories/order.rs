use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use maxibot_core::Order;
use rust_decimal::Decimal;
use sqlx::{sqlite::SqliteRow, Row};

use super::{OrderRepository, RepositoryError};
use crate::DbPool;

pub struct SqlOrderRepository {
    pool: DbPool,
}

impl SqlOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for SqlOrderRepository {
    async fn latest_order(&self, customer_id: &str) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, customer_id, product_name, address, phone, total, created_at
            FROM orders
            WHERE customer_id = ?
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(order_from_row).transpose()
    }

    async fn create_order(&self, order: &Order) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO orders (id, customer_id, product_name, address, phone, total, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&order.id)
        .bind(&order.customer_id)
        .bind(&order.product_name)
        .bind(&order.address)
        .bind(&order.phone)
        .bind(order.total.map(|total| total.to_string()))
        .bind(order.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn order_from_row(row: SqliteRow) -> Result<Order, RepositoryError> {
    let total_raw: Option<String> = row.try_get("total")?;
    let total = total_raw
        .map(|raw| {
            Decimal::from_str(&raw)
                .map_err(|err| RepositoryError::Decode(format!("invalid total `{raw}`: {err}")))
        })
        .transpose()?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;

    Ok(Order {
        id: row.try_get("id")?,
        customer_id: row.try_get("customer_id")?,
        product_name: row.try_get("product_name")?,
        address: row.try_get("address")?,
        phone: row.try_get("phone")?,
        total,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::{connect_with_settings, migrations::run_pending};

    async fn test_repo() -> SqlOrderRepository {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        run_pending(&pool).await.expect("run migrations");
        SqlOrderRepository::new(pool)
    }

    fn order(id: &str, customer_id: &str, minutes_ago: i64) -> Order {
        Order {
            id: id.to_string(),
            customer_id: customer_id.to_string(),
            product_name: "Bolsa JUMBO".to_string(),
            address: "Vivo en la calle 5 de mayo, colonia centro".to_string(),
            phone: "5512345678".to_string(),
            total: None,
            created_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[tokio::test]
    async fn latest_order_returns_most_recent_for_customer() {
        let repo = test_repo().await;

        repo.create_order(&order("o-1", "wa:1", 10)).await.expect("create");
        repo.create_order(&order("o-2", "wa:1", 1)).await.expect("create");
        repo.create_order(&order("o-3", "wa:2", 0)).await.expect("create");

        let latest = repo.latest_order("wa:1").await.expect("latest").expect("order exists");

        assert_eq!(latest.id, "o-2");
        assert_eq!(latest.phone, "5512345678");
        assert_eq!(latest.total, None);
    }

    #[tokio::test]
    async fn latest_order_is_none_for_unknown_customer() {
        let repo = test_repo().await;

        let latest = repo.latest_order("wa:nobody").await.expect("latest");

        assert!(latest.is_none());
    }
}
