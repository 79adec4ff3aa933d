//! Locations, redirect targets, and the route table that ties them to paths.
//!
//! The navigator reports where the user is as a list of path segments
//! (`["(auth)", "sign-in"]`). The guard doesn't care about individual
//! screens, only about which of three groups the user is in, so the
//! [`RouteTable`] classifies segments into a [`Location`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::RouteError;

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// Which group of screens the user is currently on.
///
/// The three groups are mutually exclusive and cover every path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    /// Sign-in / sign-up screens.
    AuthGroup,
    /// The unauthenticated landing screen at the root.
    WelcomeRoot,
    /// Everything else.
    Protected,
}

impl Location {
    pub const ALL: [Location; 3] =
        [Self::AuthGroup, Self::WelcomeRoot, Self::Protected];
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AuthGroup => write!(f, "AuthGroup"),
            Self::WelcomeRoot => write!(f, "WelcomeRoot"),
            Self::Protected => write!(f, "Protected"),
        }
    }
}

// ---------------------------------------------------------------------------
// Redirect / Decision
// ---------------------------------------------------------------------------

/// Where the guard can send the user. The concrete path comes from
/// [`RouteTable::path_for`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Redirect {
    SignIn,
    Home,
}

impl fmt::Display for Redirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SignIn => write!(f, "sign-in"),
            Self::Home => write!(f, "home"),
        }
    }
}

/// The guard's verdict for one (session, location) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// The current view may be shown.
    Allow,
    /// The current view must be replaced by the target.
    RedirectTo(Redirect),
}

impl Decision {
    pub fn is_allow(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

// ---------------------------------------------------------------------------
// RouteTable
// ---------------------------------------------------------------------------

/// The enumerated paths the guard knows about.
///
/// Defaults follow the client's file-based router:
///
/// | Field | Default | Must classify as |
/// |---|---|---|
/// | `sign_in` | `/(auth)/sign-in` | `AuthGroup` |
/// | `home` | `/(tabs)/home` | `Protected` |
/// | `welcome` | `/` | `WelcomeRoot` |
///
/// Call [`validated`](Self::validated) before handing a deserialized
/// table to the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteTable {
    /// Where unauthenticated (or invalid-role) users are sent.
    pub sign_in: String,
    /// Where authenticated users are sent when they land on a public screen.
    pub home: String,
    /// The unauthenticated landing screen.
    pub welcome: String,
    /// The first path segment that marks the auth group, e.g. `(auth)`.
    pub auth_group_segment: String,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            sign_in: "/(auth)/sign-in".to_string(),
            home: "/(tabs)/home".to_string(),
            welcome: "/".to_string(),
            auth_group_segment: "(auth)".to_string(),
        }
    }
}

impl RouteTable {
    /// Splits a path into its non-empty segments.
    ///
    /// `"/(auth)/sign-in"` → `["(auth)", "sign-in"]`, `"/"` → `[]`.
    pub fn segments_of(path: &str) -> Vec<String> {
        path.split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Classifies navigator segments into a [`Location`].
    ///
    /// Order matters: the auth group check runs first, then the empty
    /// (root) check. Anything left is protected.
    pub fn classify<S: AsRef<str>>(&self, segments: &[S]) -> Location {
        match segments.first() {
            Some(first) if first.as_ref() == self.auth_group_segment => {
                Location::AuthGroup
            }
            _ if segments.iter().all(|s| s.as_ref().is_empty()) => {
                Location::WelcomeRoot
            }
            _ => Location::Protected,
        }
    }

    /// Classifies a full path string.
    pub fn classify_path(&self, path: &str) -> Location {
        self.classify(&Self::segments_of(path))
    }

    /// The concrete path for a redirect target.
    pub fn path_for(&self, target: Redirect) -> &str {
        match target {
            Redirect::SignIn => &self.sign_in,
            Redirect::Home => &self.home,
        }
    }

    /// Checks that every configured path lands in the group the guard
    /// expects. Returns the table unchanged on success.
    pub fn validated(self) -> Result<Self, RouteError> {
        if self.auth_group_segment.is_empty() {
            return Err(RouteError::EmptyGroupSegment);
        }
        let checks = [
            ("sign_in", &self.sign_in, Location::AuthGroup),
            ("home", &self.home, Location::Protected),
            ("welcome", &self.welcome, Location::WelcomeRoot),
        ];
        for (name, path, expected) in checks {
            let actual = self.classify_path(path);
            if actual != expected {
                return Err(RouteError::Misclassified {
                    name,
                    path: path.clone(),
                    expected,
                    actual,
                });
            }
        }
        Ok(self)
    }
}
