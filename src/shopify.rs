use reqwest::{Client, Url};

use crate::config::Config;
use crate::error::ClientError;
use crate::http::{build_client, read_json};
use crate::models::{OrderEnvelope, OrderId, OrderRecord};

const SERVICE: &str = "Shopify";
const API_VERSION: &str = "2024-01";

/// Source of order records.
#[async_trait::async_trait]
pub trait OrderSource: Send + Sync {
    async fn fetch_order(&self, order_id: &OrderId) -> Result<OrderRecord, ClientError>;
}

/// Shopify Admin REST client authenticated with a static access token
pub struct ShopifyClient {
    base_url: Url,
    access_token: String,
    http_client: Client,
}

impl ShopifyClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let base_url = format!("https://{}/admin/api/{}", config.shop_domain, API_VERSION);
        Self::with_base_url(&base_url, &config.shopify_access_token)
    }

    /// Points the client at an arbitrary admin API root, e.g. a mock server.
    pub fn with_base_url(base_url: &str, access_token: &str) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| anyhow::anyhow!("invalid Shopify base URL {:?}: {}", base_url, e))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Shopify base URL {} cannot be a base", base_url);
        }

        Ok(Self {
            base_url,
            access_token: access_token.to_string(),
            http_client: build_client(SERVICE)?,
        })
    }

    fn order_url(&self, order_id: &OrderId) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in the constructor
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push("orders")
                .push(&format!("{}.json", order_id));
        }
        url
    }
}

#[async_trait::async_trait]
impl OrderSource for ShopifyClient {
    async fn fetch_order(&self, order_id: &OrderId) -> Result<OrderRecord, ClientError> {
        let url = self.order_url(order_id);
        tracing::debug!(%order_id, "Fetching order from Shopify");

        let response = self
            .http_client
            .get(url)
            .header("X-Shopify-Access-Token", &self.access_token)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                service: SERVICE,
                source,
            })?;

        let envelope: OrderEnvelope = read_json(SERVICE, response).await?;
        Ok(envelope.order)
    }
}
