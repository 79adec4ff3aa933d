//! Session state: what the client currently knows about the user.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::RoleId;

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// The authoritative session state, owned by the controller.
///
/// ```text
///                     ┌──→ Unauthenticated
///   Loading ──resolve─┼──→ Authenticated(role)
///      ↑              └──→ AuthenticatedInvalidRole
///      └──────────(trigger: mount, logout, token change)
/// ```
///
/// There is no partially-populated variant: either both lookups
/// succeeded and the role is recognized (`Authenticated`), or the state
/// says exactly which part failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// A resolution is in flight (or hasn't started yet).
    #[default]
    Loading,

    /// The authentication check said no, or failed.
    Unauthenticated,

    /// Authenticated with a recognized role.
    Authenticated(RoleId),

    /// Authenticated, but the role lookup failed or returned something
    /// outside the recognized enumeration.
    AuthenticatedInvalidRole,
}

impl SessionState {
    /// Returns `true` while resolution hasn't finished.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The resolved form of this state, or `None` while `Loading`.
    ///
    /// The guard only accepts a [`Resolution`], so a caller has to go
    /// through this method and handle `None` (suspend) before it can ask
    /// for a decision.
    pub fn resolution(&self) -> Option<Resolution> {
        match *self {
            Self::Loading => None,
            Self::Unauthenticated => Some(Resolution::Unauthenticated),
            Self::Authenticated(role) => Some(Resolution::Authenticated(role)),
            Self::AuthenticatedInvalidRole => {
                Some(Resolution::AuthenticatedInvalidRole)
            }
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => write!(f, "Loading"),
            Self::Unauthenticated => write!(f, "Unauthenticated"),
            Self::Authenticated(role) => write!(f, "Authenticated({role})"),
            Self::AuthenticatedInvalidRole => {
                write!(f, "AuthenticatedInvalidRole")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// A finished resolution: [`SessionState`] without `Loading`.
///
/// This is what the resolver returns and what the guard consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    Unauthenticated,
    Authenticated(RoleId),
    AuthenticatedInvalidRole,
}

impl Resolution {
    /// Every resolution the guard has to handle.
    pub fn all() -> impl Iterator<Item = Resolution> {
        [Self::Unauthenticated, Self::AuthenticatedInvalidRole]
            .into_iter()
            .chain(RoleId::ALL.into_iter().map(Self::Authenticated))
    }

    /// The validated role, if there is one.
    pub fn role(&self) -> Option<RoleId> {
        match self {
            Self::Authenticated(role) => Some(*role),
            _ => None,
        }
    }
}

impl From<Resolution> for SessionState {
    fn from(resolution: Resolution) -> Self {
        match resolution {
            Resolution::Unauthenticated => Self::Unauthenticated,
            Resolution::Authenticated(role) => Self::Authenticated(role),
            Resolution::AuthenticatedInvalidRole => {
                Self::AuthenticatedInvalidRole
            }
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&SessionState::from(*self), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_loading() {
        assert!(SessionState::default().is_loading());
        assert_eq!(SessionState::default().resolution(), None);
    }

    #[test]
    fn test_resolution_converts_back_to_same_state() {
        for resolution in Resolution::all() {
            let state = SessionState::from(resolution);
            assert!(!state.is_loading());
            assert_eq!(state.resolution(), Some(resolution));
        }
    }

    #[test]
    fn test_all_covers_every_resolved_variant() {
        let all: Vec<Resolution> = Resolution::all().collect();
        assert_eq!(all.len(), 5);
        assert!(all.contains(&Resolution::Unauthenticated));
        assert!(all.contains(&Resolution::AuthenticatedInvalidRole));
        assert!(all.contains(&Resolution::Authenticated(RoleId::Authority)));
    }

    #[test]
    fn test_role_only_present_when_authenticated() {
        assert_eq!(
            Resolution::Authenticated(RoleId::Admin).role(),
            Some(RoleId::Admin)
        );
        assert_eq!(Resolution::Unauthenticated.role(), None);
        assert_eq!(Resolution::AuthenticatedInvalidRole.role(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(SessionState::Loading.to_string(), "Loading");
        assert_eq!(
            Resolution::Authenticated(RoleId::Client).to_string(),
            "Authenticated(Client)"
        );
    }
}
