//! Error handling for the order intake API
//!
//! Every failure leaves a handler as `{"erro": <message>}`. Internal details
//! are logged where they happen and never reach the response body.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{debug, error};

use crate::error::OrderServiceError;

pub const MSG_NOT_JSON: &str = "Request deve ser JSON";
pub const MSG_INCOMPLETE: &str = "Dados incompletos (requer 'produto_id')";
pub const MSG_SERVICE_UNAVAILABLE: &str = "Serviço de produtos indisponível";
pub const MSG_UPSTREAM: &str = "Erro ao verificar produto";
pub const MSG_INTERNAL: &str = "Erro interno no servidor de pedidos";

/// API error type for returning standard error responses
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),
    /// Not found (404)
    NotFound(String),
    /// Internal server error (500)
    InternalServerError(String),
    /// Service unavailable (503)
    ServiceUnavailable(String),
}

impl From<OrderServiceError> for ApiError {
    fn from(err: OrderServiceError) -> Self {
        match err {
            OrderServiceError::NotJson(_) => ApiError::BadRequest(MSG_NOT_JSON.to_string()),
            OrderServiceError::InvalidInput(reason) => {
                debug!(%reason, "Rejected order payload");
                ApiError::BadRequest(MSG_INCOMPLETE.to_string())
            }
            OrderServiceError::ProductNotFound(product_ref) => {
                ApiError::NotFound(format!("Produto com ID {} não encontrado", product_ref))
            }
            OrderServiceError::UpstreamError(_) => {
                ApiError::InternalServerError(MSG_UPSTREAM.to_string())
            }
            OrderServiceError::ServiceUnavailable(_) => {
                ApiError::ServiceUnavailable(MSG_SERVICE_UNAVAILABLE.to_string())
            }
            OrderServiceError::InternalError(_) => {
                ApiError::InternalServerError(MSG_INTERNAL.to_string())
            }
            other @ OrderServiceError::ConfigError(_) => {
                error!(error = %other, "Order request failed");
                ApiError::InternalServerError(MSG_INTERNAL.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        OrderServiceError::NotJson(rejection.body_text()).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };

        (status, Json(json!({ "erro": message }))).into_response()
    }
}
