//! Configuration types for the PrestaShop webservice.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`WebserviceConfig`]: The configuration struct holding connection settings
//! - [`WebserviceConfigBuilder`]: A builder for constructing [`WebserviceConfig`] instances
//! - [`ShopUrl`]: A validated store root URL
//! - [`ApiKey`]: A validated webservice key with masked debug output
//!
//! # Example
//!
//! ```rust
//! use prestashop_webservice_extra::{WebserviceConfig, ApiKey, ShopUrl};
//!
//! let config = WebserviceConfig::builder()
//!     .shop_url(ShopUrl::new("https://shop.com").unwrap())
//!     .api_key(ApiKey::new("my-webservice-key").unwrap())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::{ApiKey, ShopUrl};

use crate::error::ConfigError;

/// Connection settings for a PrestaShop webservice.
///
/// `WebserviceConfig` is `Clone`, `Send`, and `Sync`.
///
/// # Example
///
/// ```rust
/// use prestashop_webservice_extra::{WebserviceConfig, ApiKey, ShopUrl};
///
/// let config = WebserviceConfig::builder()
///     .shop_url(ShopUrl::new("https://shop.com").unwrap())
///     .api_key(ApiKey::new("key").unwrap())
///     .debug(true)
///     .build()
///     .unwrap();
///
/// assert!(config.debug());
/// ```
#[derive(Clone, Debug)]
pub struct WebserviceConfig {
    shop_url: ShopUrl,
    api_key: ApiKey,
    debug: bool,
    user_agent_prefix: Option<String>,
}

impl WebserviceConfig {
    /// Creates a new builder for constructing a `WebserviceConfig`.
    #[must_use]
    pub fn builder() -> WebserviceConfigBuilder {
        WebserviceConfigBuilder::new()
    }

    /// Returns the store root URL.
    #[must_use]
    pub const fn shop_url(&self) -> &ShopUrl {
        &self.shop_url
    }

    /// Returns the webservice key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns whether request/response tracing is enabled.
    #[must_use]
    pub const fn debug(&self) -> bool {
        self.debug
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify WebserviceConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<WebserviceConfig>();
};

/// Builder for constructing [`WebserviceConfig`] instances.
///
/// Required fields are `shop_url` and `api_key`.
///
/// # Defaults
///
/// - `debug`: `false`
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct WebserviceConfigBuilder {
    shop_url: Option<ShopUrl>,
    api_key: Option<ApiKey>,
    debug: Option<bool>,
    user_agent_prefix: Option<String>,
}

impl WebserviceConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the store root URL (required).
    #[must_use]
    pub fn shop_url(mut self, url: ShopUrl) -> Self {
        self.shop_url = Some(url);
        self
    }

    /// Sets the webservice key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Enables tracing of every request URL and response status.
    #[must_use]
    pub const fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`WebserviceConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `shop_url` or
    /// `api_key` are not set.
    pub fn build(self) -> Result<WebserviceConfig, ConfigError> {
        let shop_url = self
            .shop_url
            .ok_or(ConfigError::MissingRequiredField { field: "shop_url" })?;
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;

        Ok(WebserviceConfig {
            shop_url,
            api_key,
            debug: self.debug.unwrap_or(false),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
