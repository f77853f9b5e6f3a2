//! Sort directions and the `sort` option encoding.

use std::fmt;
use std::str::FromStr;

use crate::query::errors::QueryError;

/// Fields whose sorting requires the `date` option to be enabled.
pub const DATE_FIELDS: &[&str] = &["date_add", "date_upd"];

/// Direction of a sorted field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortOrder {
    /// Returns the direction as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses `ASC` or `DESC`. Matching is case sensitive, like the webservice.
impl FromStr for SortOrder {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ASC" => Ok(Self::Asc),
            "DESC" => Ok(Self::Desc),
            _ => Err(QueryError::InvalidSortOrder {
                order: s.to_string(),
            }),
        }
    }
}

/// The encoded form of a sort request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EncodedSort {
    /// `[field_DIR,...]`
    pub value: String,
    /// Whether a date field is part of the sort.
    pub sorts_by_date: bool,
}

/// Validates every direction and joins the fields in input order.
pub(crate) fn encode_sort<I, F, O>(fields: I) -> Result<EncodedSort, QueryError>
where
    I: IntoIterator<Item = (F, O)>,
    F: AsRef<str>,
    O: AsRef<str>,
{
    let mut tokens = Vec::new();
    let mut sorts_by_date = false;

    for (field, order) in fields {
        let field = field.as_ref();
        let order: SortOrder = order.as_ref().parse()?;

        if DATE_FIELDS.iter().any(|date_field| *date_field == field) {
            sorts_by_date = true;
        }

        tokens.push(format!("{field}_{order}"));
    }

    if tokens.is_empty() {
        return Err(QueryError::EmptyInput {
            input: "Sort values",
        });
    }

    Ok(EncodedSort {
        value: format!("[{}]", tokens.join(",")),
        sorts_by_date,
    })
}
