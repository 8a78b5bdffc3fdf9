use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use thiserror::Error;

/// Failure talking to Shopify or Aramex
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{service} request failed: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} request failed with status {status}")]
    Status {
        service: &'static str,
        status: u16,
        body: Value,
    },

    #[error("failed to parse {service} response: {source}")]
    Decode {
        service: &'static str,
        #[source]
        source: serde_json::Error,
        body: String,
    },
}

impl ClientError {
    /// Provider's raw error payload when it sent one, otherwise the message.
    pub fn details(&self) -> Value {
        match self {
            ClientError::Status { body, .. } if !is_empty_body(body) => body.clone(),
            ClientError::Decode { body, .. } if !body.trim().is_empty() => {
                Value::String(body.clone())
            }
            _ => Value::String(self.to_string()),
        }
    }
}

fn is_empty_body(body: &Value) -> bool {
    match body {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        _ => false,
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Order has no shipping address")]
    MissingAddress,

    #[error("Aramex did not return a label URL")]
    CarrierResponse { response: Value },

    #[error("{context}")]
    Downstream {
        context: &'static str,
        #[source]
        source: ClientError,
    },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Adapter for `map_err` on client calls.
    pub fn downstream(context: &'static str) -> impl FnOnce(ClientError) -> Self {
        move |source| Self::Downstream { context, source }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MissingAddress => StatusCode::BAD_REQUEST,
            Self::CarrierResponse { .. } | Self::Downstream { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn body(&self) -> Value {
        let error = self.to_string();
        match self {
            Self::Validation(_) | Self::MissingAddress => json!({ "error": error }),
            Self::CarrierResponse { response } => json!({
                "error": error,
                "aramex_response": response,
            }),
            Self::Downstream { source, .. } => json!({
                "error": error,
                "details": source.details(),
            }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_details_prefer_provider_payload() {
        let err = ClientError::Status {
            service: "Aramex",
            status: 401,
            body: json!({"HasErrors": true}),
        };
        assert_eq!(err.details(), json!({"HasErrors": true}));

        let err = ClientError::Status {
            service: "Shopify",
            status: 404,
            body: Value::String(String::new()),
        };
        assert_eq!(
            err.details(),
            json!("Shopify request failed with status 404")
        );
    }

    #[test]
    fn decode_error_details_keep_raw_body() {
        let source = serde_json::from_str::<Value>("<html>down</html>").unwrap_err();
        let err = ClientError::Decode {
            service: "Shopify",
            source,
            body: "<html>down</html>".to_string(),
        };

        assert_eq!(err.details(), json!("<html>down</html>"));
    }

    #[test]
    fn envelopes_match_error_kind() {
        let err = ApiError::validation("order_id is required");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.body(), json!({"error": "order_id is required"}));

        let err = ApiError::CarrierResponse {
            response: json!({"Shipments": []}),
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.body(),
            json!({
                "error": "Aramex did not return a label URL",
                "aramex_response": {"Shipments": []},
            })
        );

        let err = ApiError::downstream("Rate request failed")(ClientError::Status {
            service: "Aramex",
            status: 500,
            body: json!("boom"),
        });
        assert_eq!(
            err.body(),
            json!({"error": "Rate request failed", "details": "boom"})
        );
    }
}
