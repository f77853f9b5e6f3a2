//! Query building for the PrestaShop webservice.
//!
//! This module provides the option-assembly state machine:
//!
//! - **[`QueryBuilder`]**: accumulates one pending [`Action`] and its options
//! - **[`QueryOptions`]**: the insertion-ordered option mapping
//! - **[`PriceParameter`]**: parameters of computed price fields
//! - **[`SortOrder`]**: sort directions
//! - **[`QueryError`]**: contract violations raised by the builder
//!
//! # Wire Encodings
//!
//! | Operation | Option | Value |
//! |---|---|---|
//! | value filter | `filter[field]` | `[v]` |
//! | values filter | `filter[field]` | `[v1\|v2]` |
//! | interval filter | `filter[field]` | `[min,max]` |
//! | begins by / ends by / contains | `filter[field]` | `[v]%` / `%[v]` / `%[v]%` |
//! | display | `display` | `[f1,f2]` or `full` |
//! | sort | `sort` (+ `date = 1`) | `[f1_ASC,f2_DESC]` |
//! | limit | `limit` | `n` or `offset,n` |
//! | languages | `language` | `id`, `[1\|2]` or `[min,max]` |
//! | price parameter | `price[field][param]` | value |
//!
//! # Example
//!
//! ```rust,ignore
//! use prestashop_webservice_extra::{QueryBuilder, XmlDocument};
//!
//! let mut query = QueryBuilder::from_config(&config)?;
//!
//! // Retrieve the ten most recent active products
//! let products = query
//!     .get("products")?
//!     .add_value_filter("active", "1")?
//!     .sort([("date_add", "DESC")])?
//!     .limit(10, 0)?
//!     .execute_query()
//!     .await?;
//!
//! // Update product 2
//! query
//!     .edit("products")?
//!     .id(2)?
//!     .send_xml(XmlDocument::new(updated_xml))?
//!     .execute_query()
//!     .await?;
//! ```

mod action;
mod builder;
mod errors;
mod options;
mod price;
mod sort;

pub use action::Action;
pub use builder::QueryBuilder;
pub use errors::QueryError;
pub use options::{OptionValue, QueryOptions};
pub use price::{PriceParameter, PRICE_RESOURCES};
pub use sort::{SortOrder, DATE_FIELDS};
