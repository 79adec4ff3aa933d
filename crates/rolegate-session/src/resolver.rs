//! The session resolver: two dependent calls in, one [`Resolution`] out.
//!
//! ```text
//! is_authenticated()
//!     ├── Err / Ok(false) ──────────────→ Unauthenticated   (no role lookup)
//!     └── Ok(true) → user_role()
//!                       ├── Err / None / bad id → AuthenticatedInvalidRole
//!                       └── Ok(role in {1,2,3}) → Authenticated(role)
//! ```
//!
//! The resolver holds no state between calls: every `resolve()` is a
//! fresh pair of collaborator calls, nothing is cached.

use std::sync::Arc;

use rolegate_types::{Resolution, RoleId};

use crate::{AuthVerifier, RoleProvider, SessionError};

/// What happened during one resolution, for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionTrace {
    /// Whether the role lookup was called at all.
    pub role_lookup_issued: bool,
    /// The failure absorbed into the resolution, if any.
    pub failure: Option<SessionError>,
}

/// Combines an [`AuthVerifier`] and a [`RoleProvider`] into one
/// session resolution.
///
/// Cheap to clone: both collaborators sit behind `Arc`, so the controller
/// can move a copy into each resolution task.
pub struct SessionResolver<A: AuthVerifier, R: RoleProvider> {
    verifier: Arc<A>,
    roles: Arc<R>,
}

// Manual impl: `#[derive(Clone)]` would require `A: Clone + R: Clone`,
// but only the `Arc`s are cloned.
impl<A: AuthVerifier, R: RoleProvider> Clone for SessionResolver<A, R> {
    fn clone(&self) -> Self {
        Self {
            verifier: Arc::clone(&self.verifier),
            roles: Arc::clone(&self.roles),
        }
    }
}

impl<A: AuthVerifier, R: RoleProvider> SessionResolver<A, R> {
    /// Creates a resolver that owns its collaborators.
    pub fn new(verifier: A, roles: R) -> Self {
        Self::from_shared(Arc::new(verifier), Arc::new(roles))
    }

    /// Creates a resolver from collaborators that are shared elsewhere
    /// (for example, with the screens that call `logout`).
    pub fn from_shared(verifier: Arc<A>, roles: Arc<R>) -> Self {
        Self { verifier, roles }
    }

    /// Resolves the current session. Never fails.
    pub async fn resolve(&self) -> Resolution {
        self.resolve_traced().await.0
    }

    /// Resolves the current session and reports how it got there.
    pub async fn resolve_traced(&self) -> (Resolution, ResolutionTrace) {
        let authenticated = match self.verifier.is_authenticated().await {
            Ok(authenticated) => authenticated,
            Err(e) => {
                tracing::warn!(error = %e, "authentication check failed, treating as signed out");
                return (
                    Resolution::Unauthenticated,
                    ResolutionTrace {
                        role_lookup_issued: false,
                        failure: Some(e),
                    },
                );
            }
        };

        if !authenticated {
            tracing::info!("not authenticated, skipping role lookup");
            return (
                Resolution::Unauthenticated,
                ResolutionTrace {
                    role_lookup_issued: false,
                    failure: None,
                },
            );
        }

        let outcome = match self.roles.user_role().await {
            Ok(Some(payload)) => match payload.role_id {
                Some(raw) => {
                    RoleId::from_raw(raw).ok_or(SessionError::UnknownRole(raw))
                }
                None => Err(SessionError::MissingRole),
            },
            Ok(None) => Err(SessionError::MissingRole),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(role) => {
                tracing::debug!(%role, "session resolved");
                (
                    Resolution::Authenticated(role),
                    ResolutionTrace {
                        role_lookup_issued: true,
                        failure: None,
                    },
                )
            }
            Err(e) => {
                tracing::warn!(error = %e, "authenticated without a usable role");
                (
                    Resolution::AuthenticatedInvalidRole,
                    ResolutionTrace {
                        role_lookup_issued: true,
                        failure: Some(e),
                    },
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for `SessionResolver`.
    //!
    //! The collaborators here answer immediately with a fixed value and
    //! count how often they were called. Ordering and timing tests live in
    //! `tests/resolver.rs`.

    use std::sync::atomic::{AtomicUsize, Ordering};

    use rolegate_types::RolePayload;

    use super::*;

    // -- Helpers ----------------------------------------------------------

    struct FixedVerifier(Result<bool, SessionError>);

    impl AuthVerifier for FixedVerifier {
        async fn is_authenticated(&self) -> Result<bool, SessionError> {
            self.0.clone()
        }
    }

    struct CountingRoles {
        answer: Result<Option<RolePayload>, SessionError>,
        calls: AtomicUsize,
    }

    impl CountingRoles {
        fn new(answer: Result<Option<RolePayload>, SessionError>) -> Self {
            Self {
                answer,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl RoleProvider for CountingRoles {
        async fn user_role(
            &self,
        ) -> Result<Option<RolePayload>, SessionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer.clone()
        }
    }

    /// Builds a resolver and keeps a handle on the role provider so the
    /// test can read its call count afterwards.
    fn resolver(
        auth: Result<bool, SessionError>,
        role: Result<Option<RolePayload>, SessionError>,
    ) -> (SessionResolver<FixedVerifier, CountingRoles>, Arc<CountingRoles>) {
        let roles = Arc::new(CountingRoles::new(role));
        let resolver = SessionResolver::from_shared(
            Arc::new(FixedVerifier(auth)),
            Arc::clone(&roles),
        );
        (resolver, roles)
    }

    // =====================================================================
    // Authentication check
    // =====================================================================

    #[tokio::test]
    async fn test_resolve_verifier_error_is_unauthenticated_without_lookup() {
        let (resolver, roles) = resolver(
            Err(SessionError::Verification("network down".into())),
            Ok(Some(RolePayload::new(1))),
        );

        let (resolution, trace) = resolver.resolve_traced().await;

        assert_eq!(resolution, Resolution::Unauthenticated);
        assert!(!trace.role_lookup_issued);
        assert_eq!(roles.calls.load(Ordering::SeqCst), 0);
        assert!(trace.failure.unwrap().is_verification_failure());
    }

    #[tokio::test]
    async fn test_resolve_not_authenticated_skips_lookup() {
        let (resolver, roles) =
            resolver(Ok(false), Ok(Some(RolePayload::new(1))));

        let (resolution, trace) = resolver.resolve_traced().await;

        assert_eq!(resolution, Resolution::Unauthenticated);
        assert_eq!(trace.failure, None);
        assert_eq!(roles.calls.load(Ordering::SeqCst), 0);
    }

    // =====================================================================
    // Role lookup
    // =====================================================================

    #[tokio::test]
    async fn test_resolve_recognized_roles_are_authenticated() {
        for role in RoleId::ALL {
            let (resolver, roles) =
                resolver(Ok(true), Ok(Some(RolePayload::new(role.as_raw()))));

            let resolution = resolver.resolve().await;

            assert_eq!(resolution, Resolution::Authenticated(role));
            assert_eq!(roles.calls.load(Ordering::SeqCst), 1);
        }
    }

    #[tokio::test]
    async fn test_resolve_unknown_role_is_invalid() {
        let (resolver, _) = resolver(Ok(true), Ok(Some(RolePayload::new(9))));

        let (resolution, trace) = resolver.resolve_traced().await;

        assert_eq!(resolution, Resolution::AuthenticatedInvalidRole);
        assert_eq!(trace.failure, Some(SessionError::UnknownRole(9)));
    }

    #[tokio::test]
    async fn test_resolve_zero_and_four_are_invalid() {
        for raw in [0, 4] {
            let (resolver, _) =
                resolver(Ok(true), Ok(Some(RolePayload::new(raw))));
            assert_eq!(
                resolver.resolve().await,
                Resolution::AuthenticatedInvalidRole,
                "raw id {raw}"
            );
        }
    }

    #[tokio::test]
    async fn test_resolve_absent_payload_is_invalid() {
        let (resolver, _) = resolver(Ok(true), Ok(None));

        let (resolution, trace) = resolver.resolve_traced().await;

        assert_eq!(resolution, Resolution::AuthenticatedInvalidRole);
        assert_eq!(trace.failure, Some(SessionError::MissingRole));
    }

    #[tokio::test]
    async fn test_resolve_payload_without_id_is_invalid() {
        let (resolver, _) =
            resolver(Ok(true), Ok(Some(RolePayload::default())));

        assert_eq!(
            resolver.resolve().await,
            Resolution::AuthenticatedInvalidRole
        );
    }

    #[tokio::test]
    async fn test_resolve_lookup_error_is_invalid() {
        let (resolver, roles) = resolver(
            Ok(true),
            Err(SessionError::RoleFetch("503".into())),
        );

        let (resolution, trace) = resolver.resolve_traced().await;

        assert_eq!(resolution, Resolution::AuthenticatedInvalidRole);
        assert!(trace.role_lookup_issued);
        assert_eq!(roles.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_resolve_does_not_cache_between_calls() {
        let (resolver, roles) =
            resolver(Ok(true), Ok(Some(RolePayload::new(2))));

        resolver.resolve().await;
        resolver.clone().resolve().await;

        assert_eq!(roles.calls.load(Ordering::SeqCst), 2);
    }
}
