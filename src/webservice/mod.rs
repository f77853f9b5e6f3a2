//! The webservice client interface and its HTTP implementation.
//!
//! # Overview
//!
//! - [`Webservice`]: the four operations a query is dispatched to
//! - [`HttpWebservice`]: a `reqwest` client for a PrestaShop store
//! - [`XmlDocument`]: opaque request and response bodies
//! - [`WebserviceError`]: failures reported by a client
//!
//! # Routing
//!
//! A query targets the `url` option when present, otherwise
//! `{shop}/api/{resource}` followed by `/{id}` when an ID is set. Remaining
//! options travel as query parameters.

mod client;
mod document;
mod errors;

use std::future::Future;

pub use client::{HttpWebservice, LIBRARY_VERSION};
pub use document::XmlDocument;
pub use errors::WebserviceError;

use crate::query::QueryOptions;

/// A client able to perform webservice queries.
///
/// Implementations receive the full option mapping built by a
/// [`QueryBuilder`](crate::QueryBuilder) and return the resulting document.
pub trait Webservice {
    /// Returns the root URL of the store.
    fn base_url(&self) -> &str;

    /// Retrieves resources.
    fn get(
        &self,
        options: &QueryOptions,
    ) -> impl Future<Output = Result<XmlDocument, WebserviceError>> + Send;

    /// Creates a resource from the `postXml` option.
    fn add(
        &self,
        options: &QueryOptions,
    ) -> impl Future<Output = Result<XmlDocument, WebserviceError>> + Send;

    /// Updates a resource from the `putXml` option.
    fn edit(
        &self,
        options: &QueryOptions,
    ) -> impl Future<Output = Result<XmlDocument, WebserviceError>> + Send;

    /// Deletes a resource.
    fn delete(
        &self,
        options: &QueryOptions,
    ) -> impl Future<Output = Result<XmlDocument, WebserviceError>> + Send;
}
