//! Error types for webservice calls.
//!
//! # Example
//!
//! ```rust,ignore
//! use prestashop_webservice_extra::WebserviceError;
//!
//! match webservice.get(&options).await {
//!     Ok(document) => println!("{document}"),
//!     Err(WebserviceError::Response { code, message }) => println!("{code}: {message}"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned by a [`Webservice`](crate::webservice::Webservice) client.
#[derive(Debug, Error)]
pub enum WebserviceError {
    /// The webservice answered with a non-successful status.
    #[error("{message}")]
    Response {
        /// The HTTP status code of the response.
        code: u16,
        /// A description of the failure.
        message: String,
    },

    /// The options name neither a resource nor a URL.
    #[error("The query targets neither a resource nor a URL.")]
    MissingTarget,

    /// An add or edit query was sent without its XML body.
    #[error("Cannot send this query without '{option}' data.")]
    MissingBody {
        /// The option that should hold the body (`postXml` or `putXml`).
        option: &'static str,
    },

    /// A network or transport error occurred.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl WebserviceError {
    /// Builds a [`WebserviceError::Response`] for a failed status code.
    #[must_use]
    pub fn from_status(code: u16) -> Self {
        let reason = match code {
            400 => "Bad Request",
            401 => "Unauthorized",
            404 => "Not Found",
            405 => "Method Not Allowed",
            500 => "Internal Server Error",
            _ => "Unexpected HTTP status",
        };
        Self::Response {
            code,
            message: format!(
                "This call to PrestaShop Web Services failed and returned an HTTP status of {code}. That means: {reason}."
            ),
        }
    }

    /// Returns the HTTP status code, if the failure came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response { code, .. } => Some(*code),
            _ => None,
        }
    }
}

// Verify WebserviceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<WebserviceError>();
};
