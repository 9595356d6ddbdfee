//! Catalog listing and seeding.

use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use cartwheel_core::Product;

use crate::catalog;
use crate::error::Result;
use crate::extract::Json;
use crate::state::AppState;
use crate::store::ProductFilter;

#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub message: String,
    pub count: u64,
}

/// `GET /api/products`
///
/// Optional `category` filter is an exact match; `search` is a
/// case-insensitive substring match on the product name.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<Product>>> {
    let filter = ProductFilter {
        category: query.category,
        search: query.search,
    };
    let products = state.products().list(&filter).await?;
    Ok(Json(products))
}

/// `POST /api/products/seed`
///
/// Drops the existing catalog and loads the built-in demo products.
pub async fn seed(State(state): State<AppState>) -> Result<Json<SeedResponse>> {
    let count = state
        .products()
        .replace_all(catalog::default_products())
        .await?;

    tracing::info!(count, "catalog seeded");
    Ok(Json(SeedResponse {
        message: "Products seeded".to_owned(),
        count,
    }))
}
