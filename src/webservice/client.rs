//! HTTP client for the PrestaShop webservice.
//!
//! This module provides the [`HttpWebservice`] type, which turns query
//! options into authenticated HTTP requests.

use std::collections::HashMap;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::config::WebserviceConfig;
use crate::query::{Action, OptionValue, QueryOptions};
use crate::webservice::{Webservice, WebserviceError, XmlDocument};

/// Library version from Cargo.toml.
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Options consumed by routing rather than sent as query parameters.
const ROUTING_OPTIONS: &[&str] = &["url", "resource", "id", "postXml", "putXml"];

/// Options forwarded on add, edit and delete requests.
const SHOP_CONTEXT_OPTIONS: &[&str] = &["id_shop", "id_group_shop"];

/// HTTP client for a PrestaShop webservice.
///
/// The client handles:
/// - URL construction from the `url` or `resource`/`id` options
/// - Basic authentication with the webservice key
/// - Query parameter encoding of filters, sorting and other options
/// - Status code mapping to [`WebserviceError`]
///
/// It never retries a request.
///
/// # Example
///
/// ```rust
/// use prestashop_webservice_extra::{ApiKey, HttpWebservice, ShopUrl, Webservice, WebserviceConfig};
///
/// let config = WebserviceConfig::builder()
///     .shop_url(ShopUrl::new("https://shop.com").unwrap())
///     .api_key(ApiKey::new("key").unwrap())
///     .build()
///     .unwrap();
///
/// let webservice = HttpWebservice::new(&config).unwrap();
/// assert_eq!(webservice.base_url(), "https://shop.com");
/// ```
#[derive(Debug)]
pub struct HttpWebservice {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Root URL of the store (e.g., `https://shop.com`).
    base_url: String,
    /// Headers included in all requests.
    default_headers: HashMap<String, String>,
    /// Whether requests and responses are traced.
    debug: bool,
}

// Verify HttpWebservice is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpWebservice>();
};

impl HttpWebservice {
    /// Creates a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WebserviceError::Network`] if the underlying reqwest client
    /// cannot be created (e.g., TLS initialization failure).
    pub fn new(config: &WebserviceConfig) -> Result<Self, WebserviceError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}PrestaShop Webservice Extra v{LIBRARY_VERSION} | Rust {rust_version}"
        );

        // The key is the user name, the password stays empty
        let credentials = STANDARD.encode(format!("{}:", config.api_key().as_ref()));

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Authorization".to_string(), format!("Basic {credentials}"));

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            base_url: config.shop_url().as_ref().to_string(),
            default_headers,
            debug: config.debug(),
        })
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Resolves the URL targeted by the options.
    ///
    /// # Errors
    ///
    /// Returns [`WebserviceError::MissingTarget`] if neither `url` nor
    /// `resource` is set.
    pub fn target_url(&self, options: &QueryOptions) -> Result<String, WebserviceError> {
        if let Some(url) = options.get("url") {
            return Ok(url.to_string());
        }

        let resource = options
            .get("resource")
            .ok_or(WebserviceError::MissingTarget)?
            .to_string();
        let mut url = format!("{}/api/{}", self.base_url, urlencoding::encode(&resource));

        if let Some(id) = options.get("id") {
            url.push('/');
            url.push_str(&id.to_string());
        }

        Ok(url)
    }

    /// Returns the query parameters sent for `action`.
    ///
    /// Retrievals send every non-routing option; other actions only forward
    /// the shop context.
    #[must_use]
    pub fn query_parameters(action: Action, options: &QueryOptions) -> Vec<(String, String)> {
        options
            .iter()
            .filter(|(key, _)| match action {
                Action::Get => !ROUTING_OPTIONS.iter().any(|routing| routing == key),
                Action::Add | Action::Edit | Action::Delete => {
                    SHOP_CONTEXT_OPTIONS.iter().any(|context| context == key)
                }
            })
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    async fn execute(
        &self,
        action: Action,
        options: &QueryOptions,
        body: Option<&XmlDocument>,
    ) -> Result<XmlDocument, WebserviceError> {
        let url = self.target_url(options)?;
        let query = Self::query_parameters(action, options);

        let mut request = match action {
            Action::Get => self.client.get(&url),
            Action::Add => self.client.post(&url),
            Action::Edit => self.client.put(&url),
            Action::Delete => self.client.delete(&url),
        };

        for (key, value) in &self.default_headers {
            request = request.header(key, value);
        }

        if !query.is_empty() {
            request = request.query(&query);
        }

        if let Some(body) = body {
            request = request
                .header("Content-Type", "text/xml")
                .body(body.as_str().to_string());
        }

        if self.debug {
            tracing::debug!(
                method = action.http_method(),
                url = %url,
                params = ?query,
                "Sending webservice request"
            );
        }

        let response = request.send().await?;
        let code = response.status().as_u16();
        let text = response.text().await?;

        if self.debug {
            tracing::debug!(status = code, body = %text, "Received webservice response");
        }

        if (200..300).contains(&code) {
            return Ok(XmlDocument::from(text));
        }

        tracing::warn!(
            "Webservice {} request to {} failed with status {}",
            action.http_method(),
            url,
            code
        );

        Err(WebserviceError::from_status(code))
    }
}

fn required_body<'a>(
    options: &'a QueryOptions,
    option: &'static str,
) -> Result<&'a XmlDocument, WebserviceError> {
    options
        .get(option)
        .and_then(OptionValue::as_xml)
        .ok_or(WebserviceError::MissingBody { option })
}

impl Webservice for HttpWebservice {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, options: &QueryOptions) -> Result<XmlDocument, WebserviceError> {
        self.execute(Action::Get, options, None).await
    }

    async fn add(&self, options: &QueryOptions) -> Result<XmlDocument, WebserviceError> {
        let body = required_body(options, "postXml")?;
        self.execute(Action::Add, options, Some(body)).await
    }

    async fn edit(&self, options: &QueryOptions) -> Result<XmlDocument, WebserviceError> {
        let body = required_body(options, "putXml")?;
        self.execute(Action::Edit, options, Some(body)).await
    }

    async fn delete(&self, options: &QueryOptions) -> Result<XmlDocument, WebserviceError> {
        self.execute(Action::Delete, options, None).await
    }
}
