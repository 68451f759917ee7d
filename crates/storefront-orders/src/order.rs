//! Order request and confirmation payloads
//!
//! Orders are never stored: a request is validated, checked against the
//! product directory and answered with a confirmation.

use serde::Serialize;
use serde_json::Value;

use crate::error::{OrderServiceError, OrderServiceResult};

pub const CONFIRMATION_MESSAGE: &str = "Pedido recebido com sucesso!";

/// Product name used when the directory's record has no `nome`
pub const UNKNOWN_PRODUCT_NAME: &str = "N/A";

/// A validated order request
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    /// Exactly as supplied by the caller
    pub product_id: Value,
}

impl OrderRequest {
    /// Validate a decoded request body
    pub fn from_payload(payload: &Value) -> OrderServiceResult<Self> {
        payload
            .as_object()
            .and_then(|fields| fields.get("produto_id"))
            .map(|product_id| Self {
                product_id: product_id.clone(),
            })
            .ok_or_else(|| OrderServiceError::InvalidInput("missing 'produto_id'".to_string()))
    }

    /// Textual form of the id used in the lookup path and in messages.
    ///
    /// Strings are used as-is, everything else in its JSON form.
    pub fn product_ref(&self) -> String {
        match &self.product_id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Body of a successful order response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderConfirmation {
    #[serde(rename = "mensagem")]
    pub message: String,
    #[serde(rename = "produto_id")]
    pub product_id: Value,
    #[serde(rename = "nome_produto")]
    pub product_name: Value,
}

impl OrderConfirmation {
    pub fn new(product_id: Value, product_name: Option<Value>) -> Self {
        Self {
            message: CONFIRMATION_MESSAGE.to_string(),
            product_id,
            product_name: product_name.unwrap_or_else(|| Value::from(UNKNOWN_PRODUCT_NAME)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_any_produto_id_value() {
        let request = OrderRequest::from_payload(&json!({"produto_id": 3, "qtd": 2})).unwrap();
        assert_eq!(request.product_id, json!(3));
        assert_eq!(request.product_ref(), "3");

        let request = OrderRequest::from_payload(&json!({"produto_id": "abc"})).unwrap();
        assert_eq!(request.product_ref(), "abc");
    }

    #[test]
    fn rejects_payloads_without_produto_id() {
        for payload in [json!({}), json!({"id": 1}), json!([1]), json!(null), json!("produto_id")] {
            assert!(matches!(
                OrderRequest::from_payload(&payload),
                Err(OrderServiceError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn confirmation_falls_back_to_placeholder_name() {
        let confirmation = OrderConfirmation::new(json!(1), None);
        assert_eq!(
            serde_json::to_value(&confirmation).unwrap(),
            json!({
                "mensagem": "Pedido recebido com sucesso!",
                "produto_id": 1,
                "nome_produto": "N/A"
            })
        );
    }
}
