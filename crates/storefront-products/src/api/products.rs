//! Product endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use super::errors::ApiError;
use crate::error::ProductServiceError;
use crate::server::ProductServer;

/// GET /produtos
pub async fn list_products_handler(State(server): State<Arc<ProductServer>>) -> impl IntoResponse {
    Json(server.list_products().await)
}

/// GET /produtos/:id
///
/// A segment that is not plain decimal digits (no sign, no spaces) can
/// never match a product, so it gets the same 404 as an unknown id.
pub async fn get_product_handler(
    State(server): State<Arc<ProductServer>>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_product_id(&raw_id).ok_or_else(|| {
        debug!(%raw_id, "Non-numeric product id");
        ProductServiceError::NotFound(raw_id.clone())
    })?;

    let product = server.get_product(id).await?;
    Ok(Json(product))
}

fn parse_product_id(raw_id: &str) -> Option<u64> {
    if raw_id.is_empty() || !raw_id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw_id.parse().ok()
}

/// POST /produtos
pub async fn create_product_handler(
    State(server): State<Arc<ProductServer>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    let product = server.create_product(&payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_ids_are_plain_digits() {
        assert_eq!(parse_product_id("5"), Some(5));
        assert_eq!(parse_product_id("007"), Some(7));
        for raw in ["+5", "-5", " 5", "5 ", "", "5.0", "99999999999999999999"] {
            assert_eq!(parse_product_id(raw), None, "{:?}", raw);
        }
    }
}
