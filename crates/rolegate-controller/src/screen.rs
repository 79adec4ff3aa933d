//! What the controller publishes: the screen to render, why a resolution
//! started, and counters.

use std::fmt;

use rolegate_guard::ViewVariant;
use rolegate_types::{Location, Redirect, SessionState};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

/// What the host should render right now.
///
/// ```text
///   Verifying ──(resolved)──┬──→ Public(location)
///       ↑                   ├──→ Protected(view)
///       │                   └──→ Redirecting(target) ──(navigated)──┐
///       │                                                           ↓
///       └───────(invalidate)─────────── Public / Protected ←────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    /// Session resolution is in flight. Shown regardless of location.
    Verifying,

    /// A redirect has been issued and not yet followed.
    Redirecting(Redirect),

    /// An unauthenticated user on a sign-in or welcome screen.
    Public(Location),

    /// An authenticated user on protected content.
    Protected(ViewVariant),
}

impl Screen {
    /// Returns `true` for the transient placeholders, including a
    /// protected screen holding the dispatcher's `Redirecting` variant.
    pub fn is_placeholder(&self) -> bool {
        match self {
            Self::Verifying | Self::Redirecting(_) => true,
            Self::Public(_) => false,
            Self::Protected(view) => !view.is_protected(),
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verifying => write!(f, "Verifying"),
            Self::Redirecting(target) => write!(f, "Redirecting({target})"),
            Self::Public(location) => write!(f, "Public({location})"),
            Self::Protected(view) => write!(f, "Protected({view})"),
        }
    }
}

// ---------------------------------------------------------------------------
// Triggers
// ---------------------------------------------------------------------------

/// Why the session is being invalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvalidationReason {
    /// The user signed out.
    Logout,
    /// A token was stored or replaced (for example, right after sign-in).
    TokenChanged,
    /// A request came back with an expired session.
    SessionExpired,
}

/// What started a resolution cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trigger {
    Mount,
    Invalidated(InvalidationReason),
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mount => write!(f, "mount"),
            Self::Invalidated(InvalidationReason::Logout) => write!(f, "logout"),
            Self::Invalidated(InvalidationReason::TokenChanged) => {
                write!(f, "token changed")
            }
            Self::Invalidated(InvalidationReason::SessionExpired) => {
                write!(f, "session expired")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Metrics / snapshot
// ---------------------------------------------------------------------------

/// Counters kept by the controller since mount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerMetrics {
    /// Resolution cycles started (mount + every invalidation).
    pub resolutions_started: u64,
    /// Resolutions whose result was written to the session state.
    pub resolutions_applied: u64,
    /// Resolutions that finished after a newer one had started.
    pub stale_discarded: u64,
    /// `Navigator::replace` calls made for guard redirects.
    pub redirects_issued: u64,
    /// Failed back navigations that fell back to home.
    pub navigation_fallbacks: u64,
}

/// A point-in-time view of the controller, for hosts and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerSnapshot {
    /// The current resolution generation (1 after mount).
    pub generation: u64,
    pub state: SessionState,
    /// The location as of the last reconcile.
    pub location: Location,
    pub screen: Screen,
    pub metrics: ControllerMetrics,
}
