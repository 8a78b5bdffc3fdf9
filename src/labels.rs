use std::sync::Arc;

use crate::aramex::Carrier;
use crate::error::ApiError;
use crate::models::{LabelResult, OrderId};
use crate::shipment::{build_submission, extract_label};
use crate::shopify::OrderSource;

const FAILURE: &str = "Label creation failed";

/// Turns a Shopify order into an Aramex shipment label.
///
/// Each call creates a new shipment; nothing is deduplicated.
#[derive(Clone)]
pub struct LabelIssuer {
    orders: Arc<dyn OrderSource>,
    carrier: Arc<dyn Carrier>,
}

impl LabelIssuer {
    pub fn new(orders: Arc<dyn OrderSource>, carrier: Arc<dyn Carrier>) -> Self {
        Self { orders, carrier }
    }

    pub async fn issue(&self, order_id: &OrderId) -> Result<LabelResult, ApiError> {
        let order = self
            .orders
            .fetch_order(order_id)
            .await
            .map_err(ApiError::downstream(FAILURE))?;

        let Some(address) = order.shipping_address else {
            tracing::warn!(%order_id, "Order has no shipping address");
            return Err(ApiError::MissingAddress);
        };

        let submission = build_submission(order_id, &address);

        let response = self
            .carrier
            .create_shipment(&submission)
            .await
            .map_err(ApiError::downstream(FAILURE))?;

        match extract_label(&response) {
            Some(label) => {
                tracing::info!(
                    %order_id,
                    airwaybill = label.airwaybill.as_deref().unwrap_or("-"),
                    "✅ Label created"
                );
                Ok(label)
            }
            None => Err(ApiError::CarrierResponse { response }),
        }
    }
}
