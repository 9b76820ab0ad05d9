//! Route registry error types.

use thiserror::Error;

use crate::core::{NavigationTarget, RoutePath};

/// Errors raised by registry mutations and session attachment.
///
/// Lookups never fail: an unknown path is an absent result, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The path is already bound to a different target in the same scope.
    #[error(
        "navigation targets must have unique routes, found '{existing}' and '{attempted}' with the same route '{path}'"
    )]
    DuplicateRoute {
        path: RoutePath,
        existing: NavigationTarget,
        attempted: NavigationTarget,
    },

    /// Internal consistency violation (e.g. a registry attached to the wrong session).
    #[error("illegal state: {0}")]
    IllegalState(String),

    /// A mandatory identifier was missing or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl RouteError {
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateRoute { .. })
    }
}
