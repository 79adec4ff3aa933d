//! The navigation guard.
//!
//! Decision table (rows: resolution, columns: location):
//!
//! ```text
//!                          AuthGroup          WelcomeRoot        Protected
//! Unauthenticated          Allow              Allow              → sign-in
//! Authenticated(role)      → home             → home             Allow
//! AuthenticatedInvalidRole → sign-in          → sign-in          → sign-in
//! ```
//!
//! There is no `Loading` row: the guard takes a [`Resolution`], so it
//! can't be asked for a decision before resolution has finished.

use rolegate_types::{Decision, Location, Redirect, Resolution, RouteTable};

/// Decides whether the user may stay where they are.
///
/// Pure and total: the same inputs always give the same decision.
pub fn evaluate(resolution: Resolution, location: Location) -> Decision {
    use Location::{AuthGroup, Protected, WelcomeRoot};

    match (resolution, location) {
        (Resolution::Unauthenticated, AuthGroup | WelcomeRoot) => Decision::Allow,
        (Resolution::Unauthenticated, Protected) => {
            Decision::RedirectTo(Redirect::SignIn)
        }
        (Resolution::Authenticated(_), Protected) => Decision::Allow,
        (Resolution::Authenticated(_), AuthGroup | WelcomeRoot) => {
            Decision::RedirectTo(Redirect::Home)
        }
        (Resolution::AuthenticatedInvalidRole, _) => {
            Decision::RedirectTo(Redirect::SignIn)
        }
    }
}

/// The session the user has once a redirect has been followed.
///
/// Sending an authenticated user with an unusable role to sign-in also
/// signs them out: sign-in is only a resting place for `Unauthenticated`.
/// Every other redirect leaves the session as it was.
pub fn after_redirect(resolution: Resolution, target: Redirect) -> Resolution {
    match (resolution, target) {
        (Resolution::AuthenticatedInvalidRole, Redirect::SignIn) => {
            Resolution::Unauthenticated
        }
        _ => resolution,
    }
}

/// Following one redirect did not lead to `Allow`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "redirect loop: {resolution} at {from} redirects to {target} ({to}), which does not settle"
)]
pub struct GuardLoop {
    pub resolution: Resolution,
    pub from: Location,
    pub target: Redirect,
    pub to: Location,
}

/// Follows at most one redirect and returns where the user comes to rest.
///
/// Returns the resting (resolution, location) pair, or [`GuardLoop`] if
/// the redirect target would itself be redirected. With a validated
/// [`RouteTable`] this never fails.
pub fn settle(
    resolution: Resolution,
    location: Location,
    routes: &RouteTable,
) -> Result<(Resolution, Location), GuardLoop> {
    let target = match evaluate(resolution, location) {
        Decision::Allow => return Ok((resolution, location)),
        Decision::RedirectTo(target) => target,
    };

    let to = routes.classify_path(routes.path_for(target));
    let next = after_redirect(resolution, target);

    if evaluate(next, to).is_allow() {
        Ok((next, to))
    } else {
        Err(GuardLoop {
            resolution,
            from: location,
            target,
            to,
        })
    }
}

#[cfg(test)]
mod tests {
    use rolegate_types::RoleId;

    use super::*;

    #[test]
    fn test_evaluate_unauthenticated_public_locations_allow() {
        assert_eq!(
            evaluate(Resolution::Unauthenticated, Location::AuthGroup),
            Decision::Allow
        );
        assert_eq!(
            evaluate(Resolution::Unauthenticated, Location::WelcomeRoot),
            Decision::Allow
        );
    }

    #[test]
    fn test_evaluate_unauthenticated_protected_redirects_to_sign_in() {
        assert_eq!(
            evaluate(Resolution::Unauthenticated, Location::Protected),
            Decision::RedirectTo(Redirect::SignIn)
        );
    }

    #[test]
    fn test_evaluate_authenticated_public_locations_redirect_home() {
        for role in RoleId::ALL {
            for location in [Location::AuthGroup, Location::WelcomeRoot] {
                assert_eq!(
                    evaluate(Resolution::Authenticated(role), location),
                    Decision::RedirectTo(Redirect::Home),
                    "{role} at {location}"
                );
            }
        }
    }

    #[test]
    fn test_evaluate_authenticated_protected_allows() {
        for role in RoleId::ALL {
            assert!(
                evaluate(Resolution::Authenticated(role), Location::Protected)
                    .is_allow()
            );
        }
    }

    #[test]
    fn test_evaluate_invalid_role_always_redirects_to_sign_in() {
        for location in Location::ALL {
            assert_eq!(
                evaluate(Resolution::AuthenticatedInvalidRole, location),
                Decision::RedirectTo(Redirect::SignIn)
            );
        }
    }

    #[test]
    fn test_after_redirect_only_signs_out_invalid_role() {
        assert_eq!(
            after_redirect(Resolution::AuthenticatedInvalidRole, Redirect::SignIn),
            Resolution::Unauthenticated
        );
        assert_eq!(
            after_redirect(Resolution::Authenticated(RoleId::Admin), Redirect::Home),
            Resolution::Authenticated(RoleId::Admin)
        );
        assert_eq!(
            after_redirect(Resolution::Unauthenticated, Redirect::SignIn),
            Resolution::Unauthenticated
        );
    }

    #[test]
    fn test_settle_allow_stays_put() {
        let routes = RouteTable::default();
        assert_eq!(
            settle(Resolution::Unauthenticated, Location::WelcomeRoot, &routes),
            Ok((Resolution::Unauthenticated, Location::WelcomeRoot))
        );
    }

    #[test]
    fn test_settle_unauthenticated_protected_rests_in_auth_group() {
        let routes = RouteTable::default();
        assert_eq!(
            settle(Resolution::Unauthenticated, Location::Protected, &routes),
            Ok((Resolution::Unauthenticated, Location::AuthGroup))
        );
    }

    #[test]
    fn test_settle_invalid_role_rests_signed_out_in_auth_group() {
        let routes = RouteTable::default();
        for location in Location::ALL {
            assert_eq!(
                settle(Resolution::AuthenticatedInvalidRole, location, &routes),
                Ok((Resolution::Unauthenticated, Location::AuthGroup))
            );
        }
    }

    #[test]
    fn test_settle_detects_home_outside_protected() {
        // An unvalidated table whose home path is the auth group would
        // bounce an authenticated user between sign-in and "home".
        let routes = RouteTable {
            home: "/(auth)/welcome-back".to_string(),
            ..RouteTable::default()
        };

        let err = settle(
            Resolution::Authenticated(RoleId::Client),
            Location::WelcomeRoot,
            &routes,
        )
        .unwrap_err();

        assert_eq!(err.target, Redirect::Home);
        assert_eq!(err.to, Location::AuthGroup);
    }
}
