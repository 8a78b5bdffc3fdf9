use anyhow::{Context, Result, bail};
use std::env;

const DEFAULT_PORT: u16 = 8080;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub app_mode: String,
    pub shopify_access_token: String,
    pub shop_domain: String,
    pub aramex: AramexCredentials,
    pub aramex_base_url: String,
}

/// Account envelope sent with every Aramex request
#[derive(Debug, Clone)]
pub struct AramexCredentials {
    pub account_number: String,
    pub account_pin: String,
    pub api_key: String,
    pub api_secret: String,
    pub entity: String,
    pub country_code: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// # Environment Variables
    /// - `PORT`: Optional - Listen port (default: 8080)
    /// - `APP_MODE`: Required - Operating mode flag, logged at startup
    /// - `SHOPIFY_ADMIN_ACCESS_TOKEN`: Required - Shopify admin API token
    /// - `SHOP_DOMAIN`: Required - Shop domain, e.g. `basiclook.myshopify.com`
    /// - `ARAMEX_ACCOUNT_NUMBER`: Required - Aramex account number
    /// - `ARAMEX_ACCOUNT_PIN`: Required - Aramex account pin
    /// - `ARAMEX_API_KEY`: Required - Aramex API user name
    /// - `ARAMEX_API_SECRET`: Required - Aramex API password
    /// - `ARAMEX_ENTITY`: Required - Aramex account entity, e.g. `AMM`
    /// - `ARAMEX_COUNTRY_CODE`: Required - Aramex account country code
    /// - `ARAMEX_BASE_URL`: Required - Aramex shipping service base URL
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but reads values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            let value = lookup(key).with_context(|| format!("{} not set", key))?;
            if value.trim().is_empty() {
                bail!("{} cannot be empty", key);
            }
            Ok(value)
        };

        // Parse port (optional, has default)
        let port = match lookup("PORT") {
            Some(raw) if !raw.trim().is_empty() => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got {:?}", raw))?,
            _ => DEFAULT_PORT,
        };

        let app_mode = required("APP_MODE")?;

        let shopify_access_token = required("SHOPIFY_ADMIN_ACCESS_TOKEN")?;
        let shop_domain = required("SHOP_DOMAIN")?;

        let aramex = AramexCredentials {
            account_number: required("ARAMEX_ACCOUNT_NUMBER")?,
            account_pin: required("ARAMEX_ACCOUNT_PIN")?,
            api_key: required("ARAMEX_API_KEY")?,
            api_secret: required("ARAMEX_API_SECRET")?,
            entity: required("ARAMEX_ENTITY")?,
            country_code: required("ARAMEX_COUNTRY_CODE")?,
        };

        let aramex_base_url = required("ARAMEX_BASE_URL")?
            .trim_end_matches('/')
            .to_string();

        Ok(Config {
            port,
            app_mode,
            shopify_access_token,
            shop_domain,
            aramex,
            aramex_base_url,
        })
    }
}
