//! Role dispatch: which protected view a role gets.

use std::fmt;

use rolegate_types::RoleId;
use serde::{Deserialize, Serialize};

/// The protected view shown for a role, or the placeholder shown while
/// a redirect away from protected content is in progress.
///
/// `Redirecting` is transient. It is only ever on screen together with a
/// guard decision to redirect; the controller never leaves it up once
/// the redirect has been followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewVariant {
    Admin,
    Authority,
    Client,
    Redirecting,
}

impl ViewVariant {
    /// Returns `true` for the three role views (anything but the placeholder).
    pub fn is_protected(&self) -> bool {
        !matches!(self, Self::Redirecting)
    }
}

impl fmt::Display for ViewVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "Admin"),
            Self::Authority => write!(f, "Authority"),
            Self::Client => write!(f, "Client"),
            Self::Redirecting => write!(f, "Redirecting"),
        }
    }
}

/// Maps a validated role to its view. Total over [`RoleId`].
pub fn view_for_role(role: RoleId) -> ViewVariant {
    match role {
        RoleId::Admin => ViewVariant::Admin,
        RoleId::Authority => ViewVariant::Authority,
        RoleId::Client => ViewVariant::Client,
    }
}

/// Maps a raw role id to its view. Missing or unrecognized ids get the
/// `Redirecting` placeholder, never a protected view.
pub fn view_for(raw: Option<i64>) -> ViewVariant {
    raw.and_then(RoleId::from_raw)
        .map_or(ViewVariant::Redirecting, view_for_role)
}
