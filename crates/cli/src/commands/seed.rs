//! Seed the product catalog.
//!
//! Reads products from a YAML file, or falls back to the built-in demo
//! catalog. By default the existing catalog is replaced; `--keep-existing`
//! leaves a non-empty table alone.

use std::path::Path;

use secrecy::SecretString;
use serde::Deserialize;
use rust_decimal::Decimal;
use tracing::info;

use cartwheel_server::catalog::default_products;
use cartwheel_server::store::{NewProduct, PgProductStore, ProductStore, StoreError, create_pool};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// One product entry in a seed file.
#[derive(Debug, Deserialize)]
struct SeedProduct {
    name: String,
    price: Decimal,
    category: String,
    image: String,
}

impl From<SeedProduct> for NewProduct {
    fn from(seed: SeedProduct) -> Self {
        Self {
            name: seed.name,
            price: seed.price,
            category: seed.category,
            image: seed.image,
        }
    }
}

/// Seed products from `file`, or the built-in catalog when `file` is `None`.
pub async fn products(file: Option<&str>, keep_existing: bool) -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .map(SecretString::from)
        .map_err(|_| SeedError::MissingEnvVar("DATABASE_URL"))?;

    let new_products = match file {
        Some(file) => {
            let path = Path::new(file);
            if !path.exists() {
                return Err(SeedError::FileNotFound(file.to_owned()));
            }
            let content = tokio::fs::read_to_string(path).await?;
            let seeds: Vec<SeedProduct> = serde_yaml::from_str(&content)?;
            info!(path = %file, count = seeds.len(), "Loaded products from file");
            seeds.into_iter().map(NewProduct::from).collect()
        }
        None => {
            let products = default_products();
            info!(count = products.len(), "Using built-in catalog");
            products
        }
    };

    let pool = create_pool(&database_url).await?;
    info!("Connected to database");

    if keep_existing {
        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&pool)
            .await?;
        if existing > 0 {
            info!(existing, "Catalog already populated, leaving it alone");
            return Ok(());
        }
    }

    let store = PgProductStore::new(pool);
    let count = store.replace_all(new_products).await?;

    info!(count, "Seeding complete!");
    Ok(())
}
