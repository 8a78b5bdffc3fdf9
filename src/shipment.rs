use serde_json::Value;

use crate::models::{
    Consignee, LabelResult, OrderId, ShipmentDetails, ShipmentSubmission, ShippingAddress, Shipper,
    Weight,
};

pub const PRODUCT_GROUP: &str = "EXP";
pub const PRODUCT_TYPE: &str = "PPX";

const SHIPPER_NAME: &str = "BasicLook";
const SHIPPER_CELL_PHONE: &str = "0790000000";
const SHIPPER_CITY: &str = "Amman";
const SHIPPER_COUNTRY_CODE: &str = "JO";

const PACKAGE_WEIGHT_KG: f64 = 1.0;
const PAYMENT_TYPE: &str = "P";
const GOODS_DESCRIPTION: &str = "Clothes";

fn shipper() -> Shipper {
    Shipper {
        name: SHIPPER_NAME.to_string(),
        cell_phone: SHIPPER_CELL_PHONE.to_string(),
        city: SHIPPER_CITY.to_string(),
        country_code: SHIPPER_COUNTRY_CODE.to_string(),
    }
}

/// Maps a Shopify shipping address onto a single-piece Aramex shipment.
pub fn build_submission(order_id: &OrderId, address: &ShippingAddress) -> ShipmentSubmission {
    let name = [address.first_name.as_deref(), address.last_name.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    ShipmentSubmission {
        reference1: format!("Order-{}", order_id),
        shipper: shipper(),
        consignee: Consignee {
            name,
            phone_number1: address.phone.clone(),
            city: address.city.clone(),
            country_code: address.country_code.clone(),
            line1: address.address1.clone(),
        },
        details: ShipmentDetails {
            actual_weight: Weight::kilograms(PACKAGE_WEIGHT_KG),
            number_of_pieces: 1,
            product_group: PRODUCT_GROUP.to_string(),
            product_type: PRODUCT_TYPE.to_string(),
            payment_type: PAYMENT_TYPE.to_string(),
            description_of_goods: GOODS_DESCRIPTION.to_string(),
        },
    }
}

/// Pulls the label from the first entry of a `CreateShipments` response.
///
/// Returns `None` when `Shipments` is absent or empty, or the first entry has
/// no non-empty `ShipmentLabelURL`.
pub fn extract_label(response: &Value) -> Option<LabelResult> {
    let shipment = response.get("Shipments")?.as_array()?.first()?;

    let label_url = shipment
        .get("ShipmentLabelURL")
        .and_then(Value::as_str)
        .filter(|url| !url.trim().is_empty())?;

    let airwaybill = match shipment.get("ID") {
        Some(Value::String(id)) if !id.is_empty() => Some(id.clone()),
        Some(Value::Number(id)) => Some(id.to_string()),
        _ => None,
    };

    Some(LabelResult {
        success: true,
        label_url: label_url.to_string(),
        airwaybill,
    })
}
