//! The option mapping accumulated by a query.
//!
//! Options are kept in insertion order so that the wire representation of a
//! query is deterministic and follows the order of the builder calls.

use std::fmt;

use indexmap::IndexMap;

use crate::query::errors::QueryError;
use crate::webservice::XmlDocument;

/// An encoded option value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionValue {
    /// A string value such as `"[1|2]"` or `"products"`.
    Text(String),
    /// An integer value such as an id or a plain limit.
    Integer(i64),
    /// A boolean flag, sent on the wire as `1` or `0`.
    Bool(bool),
    /// A request body for add and edit queries.
    Xml(XmlDocument),
}

impl OptionValue {
    /// Returns the string slice if this is a [`OptionValue::Text`].
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer if this is an [`OptionValue::Integer`].
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the document if this is an [`OptionValue::Xml`].
    #[must_use]
    pub const fn as_xml(&self) -> Option<&XmlDocument> {
        match self {
            Self::Xml(doc) => Some(doc),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Bool(b) => f.write_str(if *b { "1" } else { "0" }),
            Self::Xml(doc) => f.write_str(doc.as_str()),
        }
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u32> for OptionValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<XmlDocument> for OptionValue {
    fn from(value: XmlDocument) -> Self {
        Self::Xml(value)
    }
}

/// Insertion-ordered mapping from wire option name to encoded value.
///
/// # Example
///
/// ```rust
/// use prestashop_webservice_extra::{OptionValue, QueryOptions};
///
/// let options: QueryOptions = [("resource", OptionValue::from("products")), ("id", 2_u32.into())]
///     .into_iter()
///     .collect();
///
/// assert_eq!(options.get("id"), Some(&OptionValue::Integer(2)));
/// assert_eq!(options.keys().collect::<Vec<_>>(), vec!["resource", "id"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryOptions {
    entries: IndexMap<String, OptionValue>,
}

impl QueryOptions {
    /// Creates an empty option mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries.get(key)
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no option has been set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over option names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Inserts an option, refusing to overwrite an existing key.
    pub(crate) fn insert_unique(
        &mut self,
        key: impl Into<String>,
        value: impl Into<OptionValue>,
    ) -> Result<(), QueryError> {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return Err(QueryError::DuplicateOption { option: key });
        }
        self.entries.insert(key, value.into());
        Ok(())
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<'a> IntoIterator for &'a QueryOptions {
    type Item = (&'a String, &'a OptionValue);
    type IntoIter = indexmap::map::Iter<'a, String, OptionValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Collects pairs into a mapping; a repeated key keeps its first position and the last value.
impl<K, V> FromIterator<(K, V)> for QueryOptions
where
    K: Into<String>,
    V: Into<OptionValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { entries }
    }
}
