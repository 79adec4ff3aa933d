//! Error types for the session layer.

/// Errors reported by (or about) the session collaborators.
///
/// None of these ever leave the resolver: each one is absorbed into a
/// [`Resolution`](rolegate_types::Resolution). They show up in logs and in
/// [`ResolutionTrace`](crate::ResolutionTrace).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The authentication check could not be completed (network error,
    /// server error, unreadable local token). Resolves to `Unauthenticated`.
    #[error("authentication check failed: {0}")]
    Verification(String),

    /// The role lookup could not be completed. Resolves to
    /// `AuthenticatedInvalidRole`.
    #[error("role lookup failed: {0}")]
    RoleFetch(String),

    /// The role lookup answered, but with no role.
    #[error("role lookup returned no role")]
    MissingRole,

    /// The role lookup answered with an id the client doesn't recognize.
    #[error("role lookup returned unknown role id {0}")]
    UnknownRole(i64),
}

impl SessionError {
    /// Returns `true` for failures of the authentication check, as opposed
    /// to failures of the role lookup.
    pub fn is_verification_failure(&self) -> bool {
        matches!(self, Self::Verification(_))
    }
}
