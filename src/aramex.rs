use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::config::{AramexCredentials, Config};
use crate::error::ClientError;
use crate::http::{build_client, read_json};
use crate::models::{
    CalculateRateRequest, ClientInfo, CreateShipmentsRequest, LabelInfo, RateAddress, RateQuery,
    RateShipmentDetails, ShipmentSubmission, Weight,
};
use crate::shipment::{PRODUCT_GROUP, PRODUCT_TYPE};

const SERVICE: &str = "Aramex";

const LABEL_REPORT_ID: u32 = 9729;
const LABEL_REPORT_TYPE: &str = "URL";

/// Shipping carrier capable of quoting rates and issuing labels.
///
/// Both operations return the carrier's response body untouched; callers
/// decide which fields matter.
#[async_trait::async_trait]
pub trait Carrier: Send + Sync {
    async fn calculate_rate(&self, query: &RateQuery) -> Result<Value, ClientError>;

    async fn create_shipment(&self, shipment: &ShipmentSubmission) -> Result<Value, ClientError>;
}

pub struct AramexClient {
    base_url: String,
    credentials: AramexCredentials,
    http_client: Client,
}

impl AramexClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Self::with_base_url(&config.aramex_base_url, config.aramex.clone())
    }

    pub fn with_base_url(base_url: &str, credentials: AramexCredentials) -> anyhow::Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            http_client: build_client(SERVICE)?,
        })
    }

    fn client_info(&self) -> ClientInfo {
        ClientInfo::from(&self.credentials)
    }

    async fn post<B: Serialize + Sync>(&self, operation: &str, body: &B) -> Result<Value, ClientError> {
        let url = format!("{}/{}", self.base_url, operation);
        tracing::debug!(%url, "Calling Aramex");

        let response = self
            .http_client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                service: SERVICE,
                source,
            })?;

        // non-JSON 2xx bodies are passed through as text
        match read_json(SERVICE, response).await {
            Err(ClientError::Decode { body, .. }) => {
                tracing::warn!(operation, "Aramex returned a non-JSON body");
                Ok(Value::String(body))
            }
            other => other,
        }
    }
}

#[async_trait::async_trait]
impl Carrier for AramexClient {
    async fn calculate_rate(&self, query: &RateQuery) -> Result<Value, ClientError> {
        let payload = CalculateRateRequest {
            client_info: self.client_info(),
            origin_address: RateAddress::from(&query.origin),
            destination_address: RateAddress::from(&query.destination),
            shipment_details: RateShipmentDetails {
                actual_weight: Weight::kilograms(query.weight_kg),
                number_of_pieces: 1,
                product_group: PRODUCT_GROUP.to_string(),
                product_type: PRODUCT_TYPE.to_string(),
            },
        };

        self.post("CalculateRate", &payload).await
    }

    async fn create_shipment(&self, shipment: &ShipmentSubmission) -> Result<Value, ClientError> {
        let payload = CreateShipmentsRequest {
            client_info: self.client_info(),
            shipments: vec![shipment.clone()],
            label_info: LabelInfo {
                report_id: LABEL_REPORT_ID,
                report_type: LABEL_REPORT_TYPE.to_string(),
            },
        };

        self.post("CreateShipments", &payload).await
    }
}
