//! Collaborator hooks: the authentication check and the role lookup.
//!
//! Rolegate doesn't store tokens or talk HTTP itself. The application
//! implements these two traits on top of whatever it uses (secure storage
//! plus a `verify-token` endpoint, a mock, a fixture), and the resolver
//! calls them in a fixed order.
//!
//! Both traits return futures that are `Send`, so a resolution can run
//! inside a spawned Tokio task.

use std::future::Future;

use rolegate_types::RolePayload;

use crate::SessionError;

/// Answers "does the user currently have a valid session?".
///
/// # Example
///
/// ```rust
/// use rolegate_session::{AuthVerifier, SessionError};
///
/// /// Treats the presence of a stored token as a valid session.
/// /// Good enough offline; a real verifier would ask the backend.
/// struct TokenPresent(Option<String>);
///
/// impl AuthVerifier for TokenPresent {
///     async fn is_authenticated(&self) -> Result<bool, SessionError> {
///         Ok(self.0.is_some())
///     }
/// }
/// ```
pub trait AuthVerifier: Send + Sync + 'static {
    /// Checks the current session.
    ///
    /// # Returns
    /// - `Ok(true)`: the session is valid
    /// - `Ok(false)`: there is no session, or the backend rejected it
    /// - `Err(SessionError::Verification)`: the check itself failed
    fn is_authenticated(
        &self,
    ) -> impl Future<Output = Result<bool, SessionError>> + Send;
}

/// Looks up the role of the authenticated user.
///
/// Only ever called after [`AuthVerifier::is_authenticated`] returned
/// `Ok(true)` in the same resolution.
pub trait RoleProvider: Send + Sync + 'static {
    /// Fetches the user's role.
    ///
    /// # Returns
    /// - `Ok(Some(payload))`: the backend answered; the id may still be
    ///   missing or unrecognized, the resolver checks that
    /// - `Ok(None)`: the backend had nothing for this user
    /// - `Err(SessionError::RoleFetch)`: the lookup failed
    fn user_role(
        &self,
    ) -> impl Future<Output = Result<Option<RolePayload>, SessionError>> + Send;
}
