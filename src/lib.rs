//! # PrestaShop Webservice Extra
//!
//! A fluent query builder for the PrestaShop webservice API.
//!
//! ## Overview
//!
//! This library provides:
//! - A [`QueryBuilder`] that assembles the options of a webservice query and
//!   validates them as they are added
//! - Encoders for filters, sorting, pagination, localization and price parameters
//! - A [`Webservice`] trait describing the client a query is executed with
//! - An [`HttpWebservice`] client performing authenticated HTTP calls
//! - Type-safe configuration via [`WebserviceConfig`] and [`WebserviceConfigBuilder`]
//!
//! ## Quick Start
//!
//! ```rust
//! use prestashop_webservice_extra::{ApiKey, QueryBuilder, ShopUrl, WebserviceConfig};
//!
//! let config = WebserviceConfig::builder()
//!     .shop_url(ShopUrl::new("https://shop.com").unwrap())
//!     .api_key(ApiKey::new("ZQ88PRJX5VWQHCWE4EE7SQ7HPNX00RAJ").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let mut query = QueryBuilder::from_config(&config).unwrap();
//! query
//!     .get("products")
//!     .unwrap()
//!     .add_values_filter("id", ["1", "2", "3"])
//!     .unwrap()
//!     .display_full()
//!     .unwrap();
//!
//! assert_eq!(
//!     query.query_options().get("filter[id]").unwrap().to_string(),
//!     "[1|2|3]"
//! );
//! ```
//!
//! ## Executing Queries
//!
//! ```rust,ignore
//! let document = query.execute_query().await?;
//! println!("{document}");
//! ```
//!
//! Executing resets the builder, so it can be reused for the next query.
//!
//! ## Design Principles
//!
//! - **Fail-fast validation**: Every builder call checks its preconditions
//! - **One action per query**: Setting a second action is an error
//! - **No overwrites**: Each option can only be set once per query
//! - **Opaque XML**: Documents are passed through without parsing

pub mod config;
pub mod error;
pub mod query;
pub mod webservice;

// Re-export public types at crate root for convenience
pub use config::{ApiKey, ShopUrl, WebserviceConfig, WebserviceConfigBuilder};
pub use error::ConfigError;

pub use query::{
    Action, OptionValue, PriceParameter, QueryBuilder, QueryError, QueryOptions, SortOrder,
};

pub use webservice::{HttpWebservice, Webservice, WebserviceError, XmlDocument};
