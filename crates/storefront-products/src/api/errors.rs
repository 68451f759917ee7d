//! Error handling for the product directory API
//!
//! Every failure leaves a handler as `{"erro": <message>}` with a matching status.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{debug, error};

use crate::error::ProductServiceError;

pub const MSG_NOT_JSON: &str = "Request deve ser JSON";
pub const MSG_INCOMPLETE: &str = "Dados incompletos (requer 'nome' e 'preco')";
pub const MSG_NOT_FOUND: &str = "Produto não encontrado";
pub const MSG_INTERNAL: &str = "Erro interno no servidor de produtos";

/// API error type for returning standard error responses
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(&'static str),
    /// Not found (404)
    NotFound(&'static str),
    /// Internal server error (500)
    InternalServerError(&'static str),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, *msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, *msg),
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, *msg),
        }
    }
}

impl From<ProductServiceError> for ApiError {
    fn from(err: ProductServiceError) -> Self {
        match err {
            ProductServiceError::NotJson(_) => ApiError::BadRequest(MSG_NOT_JSON),
            ProductServiceError::InvalidInput(reason) => {
                debug!(%reason, "Rejected product payload");
                ApiError::BadRequest(MSG_INCOMPLETE)
            }
            ProductServiceError::NotFound(_) => ApiError::NotFound(MSG_NOT_FOUND),
            other => {
                error!(error = %other, "Product request failed");
                ApiError::InternalServerError(MSG_INTERNAL)
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ProductServiceError::NotJson(rejection.body_text()).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.parts();
        (status, Json(json!({ "erro": message }))).into_response()
    }
}
