//! The CRUD verb a query performs.

use std::fmt;

/// The action of a webservice query.
///
/// Each action maps to one operation of the
/// [`Webservice`](crate::webservice::Webservice) client and to one HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Retrieve resources (GET).
    Get,
    /// Create a resource (POST).
    Add,
    /// Update a resource (PUT).
    Edit,
    /// Remove a resource (DELETE).
    Delete,
}

impl Action {
    /// Returns the action name as used in error messages and logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Add => "add",
            Self::Edit => "edit",
            Self::Delete => "delete",
        }
    }

    /// Returns the HTTP method used to perform this action.
    #[must_use]
    pub const fn http_method(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Add => "POST",
            Self::Edit => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
