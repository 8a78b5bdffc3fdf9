use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::config::AramexCredentials;

/// Shopify order identifier as sent by callers: a JSON integer or a string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderId {
    Numeric(u64),
    Text(String),
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderId::Numeric(id) => write!(f, "{}", id),
            OrderId::Text(id) => f.write_str(id),
        }
    }
}

/// Why a label request carries no usable order id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderIdError {
    /// Absent, `null`, `0` or a blank string
    Missing,
    /// Present but neither a positive integer nor a string
    Invalid,
}

/// Body of `POST /create-label`
#[derive(Debug, Default, Deserialize)]
pub struct LabelRequest {
    #[serde(default)]
    pub order_id: Option<Value>,
}

impl LabelRequest {
    pub fn into_order_id(self) -> Result<OrderId, OrderIdError> {
        match self.order_id {
            None | Some(Value::Null) => Err(OrderIdError::Missing),
            Some(Value::String(id)) => {
                let id = id.trim();
                if id.is_empty() {
                    Err(OrderIdError::Missing)
                } else {
                    Ok(OrderId::Text(id.to_string()))
                }
            }
            Some(Value::Number(id)) => match id.as_u64() {
                Some(0) => Err(OrderIdError::Missing),
                Some(id) => Ok(OrderId::Numeric(id)),
                None => Err(OrderIdError::Invalid),
            },
            Some(_) => Err(OrderIdError::Invalid),
        }
    }
}

/// Body of `POST /aramex/rate`
#[derive(Debug, Default, Deserialize)]
pub struct RateRequest {
    #[serde(default)]
    pub origin_city: Option<String>,
    #[serde(default)]
    pub origin_country_code: Option<String>,
    #[serde(default)]
    pub destination_city: Option<String>,
    #[serde(default)]
    pub destination_country_code: Option<String>,
    /// Kilograms
    #[serde(default)]
    pub weight: Option<f64>,
}

/// A rate request that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct RateQuery {
    pub origin: Location,
    pub destination: Location,
    pub weight_kg: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub city: String,
    pub country_code: Option<String>,
}

impl RateRequest {
    /// Returns `None` when origin city, destination city or weight is missing.
    pub fn into_query(self) -> Option<RateQuery> {
        let origin_city = non_blank(self.origin_city)?;
        let destination_city = non_blank(self.destination_city)?;
        let weight_kg = self.weight.filter(|w| w.is_finite() && *w > 0.0)?;

        Some(RateQuery {
            origin: Location {
                city: origin_city,
                country_code: non_blank(self.origin_country_code),
            },
            destination: Location {
                city: destination_city,
                country_code: non_blank(self.destination_country_code),
            },
            weight_kg,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Normalized result of `POST /create-label`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelResult {
    pub success: bool,
    pub label_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airwaybill: Option<String>,
}

/// Shopify `GET /orders/{id}.json` response (partial, only fields we need)
#[derive(Debug, Deserialize)]
pub struct OrderEnvelope {
    pub order: OrderRecord,
}

/// Shopify order (partial, only fields we need)
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRecord {
    #[serde(default)]
    pub shipping_address: Option<ShippingAddress>,
}

/// Shopify shipping address (partial); Shopify sends `null` for unset fields
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShippingAddress {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub address1: Option<String>,
}

/// Aramex `ClientInfo` credential envelope
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClientInfo {
    pub user_name: String,
    pub password: String,
    pub version: String,
    pub account_number: String,
    pub account_pin: String,
    pub account_entity: String,
    pub account_country_code: String,
}

impl From<&AramexCredentials> for ClientInfo {
    fn from(credentials: &AramexCredentials) -> Self {
        Self {
            user_name: credentials.api_key.clone(),
            password: credentials.api_secret.clone(),
            version: "v1".to_string(),
            account_number: credentials.account_number.clone(),
            account_pin: credentials.account_pin.clone(),
            account_entity: credentials.entity.clone(),
            account_country_code: credentials.country_code.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Weight {
    pub value: f64,
    pub unit: String,
}

impl Weight {
    pub fn kilograms(value: f64) -> Self {
        Self {
            value,
            unit: "KG".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RateAddress {
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

impl From<&Location> for RateAddress {
    fn from(location: &Location) -> Self {
        Self {
            city: location.city.clone(),
            country_code: location.country_code.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RateShipmentDetails {
    pub actual_weight: Weight,
    pub number_of_pieces: u32,
    pub product_group: String,
    pub product_type: String,
}

/// Aramex `CalculateRate` request body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CalculateRateRequest {
    pub client_info: ClientInfo,
    pub origin_address: RateAddress,
    pub destination_address: RateAddress,
    pub shipment_details: RateShipmentDetails,
}

/// One entry of the Aramex `CreateShipments` request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShipmentSubmission {
    pub reference1: String,
    pub shipper: Shipper,
    pub consignee: Consignee,
    pub details: ShipmentDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Shipper {
    pub name: String,
    pub cell_phone: String,
    pub city: String,
    pub country_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Consignee {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line1: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShipmentDetails {
    pub actual_weight: Weight,
    pub number_of_pieces: u32,
    pub product_group: String,
    pub product_type: String,
    pub payment_type: String,
    pub description_of_goods: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LabelInfo {
    #[serde(rename = "ReportID")]
    pub report_id: u32,
    #[serde(rename = "ReportType")]
    pub report_type: String,
}

/// Aramex `CreateShipments` request body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateShipmentsRequest {
    pub client_info: ClientInfo,
    pub shipments: Vec<ShipmentSubmission>,
    pub label_info: LabelInfo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rate_request(value: serde_json::Value) -> RateRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn rate_request_requires_cities_and_weight() {
        let missing = [
            json!({"destination_city": "Dubai", "weight": 2}),
            json!({"origin_city": "Amman", "weight": 2}),
            json!({"origin_city": "Amman", "destination_city": "Dubai"}),
            json!({"origin_city": "", "destination_city": "Dubai", "weight": 2}),
            json!({"origin_city": "Amman", "destination_city": "  ", "weight": 2}),
            json!({"origin_city": "Amman", "destination_city": "Dubai", "weight": 0}),
            json!({"origin_city": "Amman", "destination_city": "Dubai", "weight": -2}),
        ];

        for body in missing {
            assert!(rate_request(body.clone()).into_query().is_none(), "{}", body);
        }
    }

    #[test]
    fn rate_request_keeps_optional_country_codes() {
        let query = rate_request(json!({
            "origin_city": "Amman",
            "origin_country_code": "JO",
            "destination_city": "Dubai",
            "weight": 2
        }))
        .into_query()
        .unwrap();

        assert_eq!(query.origin.country_code.as_deref(), Some("JO"));
        assert_eq!(query.destination.country_code, None);
        assert_eq!(query.weight_kg, 2.0);
    }

    fn order_id(value: serde_json::Value) -> Result<OrderId, OrderIdError> {
        serde_json::from_value::<LabelRequest>(value).unwrap().into_order_id()
    }

    #[test]
    fn order_id_accepts_integers_and_strings() {
        assert_eq!(order_id(json!({"order_id": 12345})), Ok(OrderId::Numeric(12345)));
        assert_eq!(
            order_id(json!({"order_id": " 12345 "})),
            Ok(OrderId::Text("12345".to_string()))
        );
    }

    #[test]
    fn order_id_distinguishes_missing_from_malformed() {
        for body in [
            json!({}),
            json!({"order_id": null}),
            json!({"order_id": 0}),
            json!({"order_id": "  "}),
        ] {
            assert_eq!(order_id(body.clone()), Err(OrderIdError::Missing), "{}", body);
        }

        for body in [
            json!({"order_id": 12345.5}),
            json!({"order_id": -5}),
            json!({"order_id": true}),
            json!({"order_id": [1]}),
        ] {
            assert_eq!(order_id(body.clone()), Err(OrderIdError::Invalid), "{}", body);
        }
    }

    #[test]
    fn label_info_uses_aramex_field_names() {
        let value = serde_json::to_value(LabelInfo {
            report_id: 9729,
            report_type: "URL".to_string(),
        })
        .unwrap();

        assert_eq!(value, json!({"ReportID": 9729, "ReportType": "URL"}));
    }
}
