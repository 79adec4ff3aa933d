//! Error types for route configuration.

use crate::Location;

/// Errors raised when a [`RouteTable`](crate::RouteTable) cannot be used
/// safely by the guard.
///
/// The guard's redirect targets must land in the right location group,
/// otherwise following a redirect could produce another redirect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// A configured path classifies into the wrong location group.
    /// For example, a sign-in path outside the auth group.
    #[error("route `{name}` ({path}) classifies as {actual}, expected {expected}")]
    Misclassified {
        name: &'static str,
        path: String,
        expected: Location,
        actual: Location,
    },

    /// The auth group segment is empty, so nothing could ever be
    /// classified as part of the auth group.
    #[error("auth group segment must not be empty")]
    EmptyGroupSegment,
}

/// A raw role id outside the recognized enumeration.
///
/// Returned by `RoleId::try_from(i64)`. The resolver never surfaces this;
/// it turns it into `AuthenticatedInvalidRole`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown role id {0}")]
pub struct UnknownRole(pub i64);
