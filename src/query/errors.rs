//! Error types for query building and execution.
//!
//! Every variant except [`QueryError::Webservice`] is a contract violation
//! raised immediately by the builder call that triggered it. Nothing is
//! retried and nothing is logged.
//!
//! # Example
//!
//! ```rust,ignore
//! use prestashop_webservice_extra::QueryError;
//!
//! match builder.id(2) {
//!     Ok(_) => {}
//!     Err(QueryError::InvalidQueryState) => println!("call get/add/edit/delete first"),
//!     Err(QueryError::ForbiddenAction { current, .. }) => println!("not allowed for {current}"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::query::Action;
use crate::webservice::WebserviceError;

/// Error type for query builder operations.
#[derive(Debug, Error)]
pub enum QueryError {
    /// An action was set while another one is still pending.
    #[error("You're trying to overwrite the webservice query action ({current} is pending, {requested} requested). Only one query action should be used.")]
    DuplicateAction {
        /// The pending action.
        current: Action,
        /// The action that was requested.
        requested: Action,
    },

    /// An option key was written twice in one query.
    #[error("You're trying to overwrite the webservice query option '{option}'. Each query option should be defined only once.")]
    DuplicateOption {
        /// The wire name of the option.
        option: String,
    },

    /// An option was added before any action was set.
    #[error("You're trying to add a query option before defining the query action. The query action must always be defined before any query option.")]
    InvalidQueryState,

    /// The option is not permitted for the pending action.
    #[error("This query option can only be used with these actions: {}. Current one ({current}) is forbidden.", join_actions(.allowed))]
    ForbiddenAction {
        /// The actions the option is permitted with.
        allowed: &'static [Action],
        /// The pending action.
        current: Action,
    },

    /// The option is not permitted for the targeted resource.
    #[error("This query option can only be used with these resources: {}. Current one ({}) is forbidden.", .allowed.join(", "), .current.as_deref().unwrap_or("none"))]
    ForbiddenResource {
        /// The resources the option is permitted with.
        allowed: &'static [&'static str],
        /// The targeted resource, `None` for queries built from a raw URL.
        current: Option<String>,
    },

    /// A list or mapping that must contain at least one entry was empty.
    #[error("{input} array shouldn't be empty.")]
    EmptyInput {
        /// What the empty input was meant to contain.
        input: &'static str,
    },

    /// A sort direction other than `ASC` or `DESC`.
    #[error("Please provide a valid order value (ASC or DESC), got '{order}'.")]
    InvalidSortOrder {
        /// The rejected direction.
        order: String,
    },

    /// The query was executed without an action.
    #[error("No query action is defined. Call get, add, edit or delete before executing the query.")]
    NoAction,

    /// The webservice client failed to perform the query.
    #[error(transparent)]
    Webservice(#[from] WebserviceError),
}

fn join_actions(actions: &[Action]) -> String {
    actions
        .iter()
        .map(Action::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

// Verify QueryError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<QueryError>();
};
