use serde::Serialize;

use crate::connection::DbPool;
use crate::repositories::RepositoryError;

/// Canonical trash-bag catalog used by `maxibot seed` and the demo flows.
const SEED_PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        name: "Bolsa chica",
        description: "Bolsa para basura chica, paquete con 50 piezas",
        price: "180",
        stock: 120,
    },
    SeedProduct {
        name: "Bolsa mediana",
        description: "Bolsa para basura mediana, paquete con 50 piezas",
        price: "250",
        stock: 80,
    },
    SeedProduct {
        name: "Bolsa grande",
        description: "Bolsa para basura grande, paquete con 25 piezas",
        price: "320",
        stock: 60,
    },
    SeedProduct {
        name: "Bolsa grande gruesa",
        description: "Bolsa grande calibre grueso, aguanta escombro ligero",
        price: "390",
        stock: 35,
    },
    SeedProduct {
        name: "Bolsa JUMBO",
        description: "Bolsa JUMBO de 90x120 cm, paquete con 20 piezas",
        price: "340",
        stock: 45,
    },
    SeedProduct {
        name: "Bolsa JUMBO gruesa",
        description: "Bolsa JUMBO calibre 400, la más resistente del catálogo",
        price: "450",
        stock: 25,
    },
];

struct SeedProduct {
    name: &'static str,
    description: &'static str,
    price: &'static str,
    stock: i64,
}

#[derive(Debug, Serialize)]
pub struct SeedResult {
    pub products_seeded: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct VerificationResult {
    pub passed: bool,
    pub checks: Vec<SeedCheck>,
}

#[derive(Debug, Serialize)]
pub struct SeedCheck {
    pub name: String,
    pub passed: bool,
    pub detail: String,
}

/// Load the demo catalog. Re-running replaces existing rows by name, keeping
/// each product at its original catalog position.
pub async fn load(pool: &DbPool) -> Result<SeedResult, RepositoryError> {
    let mut tx = pool.begin().await?;

    for (index, product) in SEED_PRODUCTS.iter().enumerate() {
        sqlx::query(
            "INSERT OR REPLACE INTO products (name, description, price, stock, position) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(product.name)
        .bind(product.description)
        .bind(product.price)
        .bind(product.stock)
        .bind(index as i64 + 1)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok(SeedResult { products_seeded: SEED_PRODUCTS.iter().map(|product| product.name).collect() })
}

/// Verify the demo catalog is present and complete.
pub async fn verify(pool: &DbPool) -> Result<VerificationResult, RepositoryError> {
    let mut checks = Vec::new();

    for product in SEED_PRODUCTS {
        let row: Option<(String, i64)> = sqlx::query_as(
            "SELECT price, stock FROM products WHERE name = ?",
        )
        .bind(product.name)
        .fetch_optional(pool)
        .await?;

        let (passed, detail) = match row {
            Some((price, stock)) if price == product.price && stock == product.stock => {
                (true, "present".to_string())
            }
            Some((price, stock)) => {
                (false, format!("unexpected price/stock: {price}/{stock}"))
            }
            None => (false, "missing".to_string()),
        };

        checks.push(SeedCheck { name: format!("product `{}`", product.name), passed, detail });
    }

    let passed = checks.iter().all(|check| check.passed);
    Ok(VerificationResult { passed, checks })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{connect_with_settings, migrations::run_pending};
    use crate::repositories::{ProductRepository, SqlProductRepository};

    #[tokio::test]
    async fn seed_load_is_repeatable_and_verifiable() {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        run_pending(&pool).await.expect("run migrations");

        let first = load(&pool).await.expect("first seed");
        let second = load(&pool).await.expect("second seed");
        assert_eq!(first.products_seeded.len(), second.products_seeded.len());

        let verification = verify(&pool).await.expect("verify");
        assert!(verification.passed, "seed verification failed: {:?}", verification.checks);

        let repo = SqlProductRepository::new(pool);
        let products = repo.list_products().await.expect("list products");
        assert_eq!(products.len(), SEED_PRODUCTS.len(), "re-seeding must not duplicate rows");

        // Catalog order survives the re-seed; a fresh conversation leads with
        // the small bags, not the alphabetically-first JUMBO ones.
        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
        let expected: Vec<&str> = SEED_PRODUCTS.iter().map(|p| p.name).collect();
        assert_eq!(names, expected);
        assert_eq!(&names[..2], &["Bolsa chica", "Bolsa mediana"]);
    }
}
