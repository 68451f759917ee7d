//! Order endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use super::errors::ApiError;
use crate::server::OrderServer;

/// POST /pedidos
pub async fn create_order_handler(
    State(server): State<Arc<OrderServer>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    let confirmation = server.create_order(&payload).await?;
    Ok((StatusCode::CREATED, Json(confirmation)))
}
