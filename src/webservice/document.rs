//! Opaque XML payloads exchanged with the webservice.

use std::fmt;

/// A serialized XML document.
///
/// The crate never parses XML: request bodies are passed through exactly as
/// given and response bodies are returned exactly as received.
///
/// # Example
///
/// ```rust
/// use prestashop_webservice_extra::XmlDocument;
///
/// let doc = XmlDocument::new("<prestashop><product/></prestashop>");
/// assert_eq!(doc.as_str(), "<prestashop><product/></prestashop>");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct XmlDocument(String);

impl XmlDocument {
    /// Wraps an already serialized document.
    #[must_use]
    pub fn new(xml: impl Into<String>) -> Self {
        Self(xml.into())
    }

    /// Returns the serialized document.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the document has no content (e.g. a 204 response).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Consumes the wrapper, returning the serialized document.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for XmlDocument {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for XmlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for XmlDocument {
    fn from(xml: String) -> Self {
        Self(xml)
    }
}

impl From<&str> for XmlDocument {
    fn from(xml: &str) -> Self {
        Self(xml.to_string())
    }
}
