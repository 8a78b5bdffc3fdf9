//! HTTP surface of the bridge.
//!
//! - `GET /` - liveness text
//! - `GET /shipping-rates` - points callers at the rate endpoint
//! - `POST /aramex/rate` - proxies a rate quote to Aramex
//! - `POST /create-label` - creates an Aramex shipment for a Shopify order

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::aramex::Carrier;
use crate::error::ApiError;
use crate::labels::LabelIssuer;
use crate::models::{LabelRequest, LabelResult, OrderIdError, RateRequest};
use crate::shopify::OrderSource;

/// Shared, immutable handles to the outbound clients
#[derive(Clone)]
pub struct AppState {
    carrier: Arc<dyn Carrier>,
    labels: LabelIssuer,
}

impl AppState {
    pub fn new(orders: Arc<dyn OrderSource>, carrier: Arc<dyn Carrier>) -> Self {
        Self {
            labels: LabelIssuer::new(orders, carrier.clone()),
            carrier,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/shipping-rates", get(shipping_rates))
        .route("/aramex/rate", post(aramex_rate))
        .route("/create-label", post(create_label))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> &'static str {
    "BasicLook Shipping App backend is running!"
}

async fn shipping_rates() -> Json<Value> {
    Json(json!({
        "message": "Shipping rates endpoint working!",
        "example_route": "POST /aramex/rate",
    }))
}

async fn aramex_rate(
    State(state): State<AppState>,
    body: Result<Json<RateRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    const MISSING: &str = "Missing required rate parameters";

    let Json(request) = body.map_err(|rejection| {
        tracing::debug!(%rejection, "Rejected rate request body");
        ApiError::validation(MISSING)
    })?;
    let query = request
        .into_query()
        .ok_or_else(|| ApiError::validation(MISSING))?;

    match state.carrier.calculate_rate(&query).await {
        Ok(rate) => Ok(Json(rate)),
        Err(err) => {
            tracing::error!(details = %err.details(), "RATE ERROR: {}", err);
            Err(ApiError::downstream("Rate request failed")(err))
        }
    }
}

async fn create_label(
    State(state): State<AppState>,
    body: Result<Json<LabelRequest>, JsonRejection>,
) -> Result<Json<LabelResult>, ApiError> {
    const MISSING: &str = "order_id is required";

    let Json(request) = body.map_err(|rejection| {
        tracing::debug!(%rejection, "Rejected label request body");
        ApiError::validation(MISSING)
    })?;
    let order_id = request.into_order_id().map_err(|err| match err {
        OrderIdError::Missing => ApiError::validation(MISSING),
        OrderIdError::Invalid => {
            ApiError::validation("order_id must be a positive integer or a non-empty string")
        }
    })?;

    match state.labels.issue(&order_id).await {
        Ok(label) => Ok(Json(label)),
        Err(err) => {
            if let ApiError::Downstream { source, .. } = &err {
                tracing::error!(%order_id, details = %source.details(), "LABEL ERROR: {}", source);
            } else if err.status_code().is_server_error() {
                tracing::error!(%order_id, body = %err.body(), "LABEL ERROR");
            }
            Err(err)
        }
    }
}
