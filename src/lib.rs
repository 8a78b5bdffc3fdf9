//! Bridges Shopify orders to Aramex shipments: proxies rate quotes and turns
//! an order's shipping address into a printable Aramex label.

pub mod aramex;
pub mod config;
pub mod error;
mod http;
pub mod labels;
pub mod models;
pub mod routes;
pub mod server;
pub mod shipment;
pub mod shopify;
