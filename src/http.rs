use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use crate::error::ClientError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) fn build_client(service: &'static str) -> Result<Client, ClientError> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|source| ClientError::Transport { service, source })
}

/// Reads the body and decodes it, turning non-2xx responses into
/// [`ClientError::Status`] with the provider's payload attached.
pub(crate) async fn read_json<T: DeserializeOwned>(
    service: &'static str,
    response: Response,
) -> Result<T, ClientError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|source| ClientError::Transport { service, source })?;

    if !status.is_success() {
        let body = serde_json::from_str::<Value>(&body).unwrap_or_else(|_| Value::String(body));
        return Err(ClientError::Status {
            service,
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|source| ClientError::Decode {
        service,
        source,
        body,
    })
}
