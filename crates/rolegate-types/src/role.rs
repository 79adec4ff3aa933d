//! Role identifiers and the role-lookup payload.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::UnknownRole;

// ---------------------------------------------------------------------------
// RoleId
// ---------------------------------------------------------------------------

/// A recognized user role.
///
/// The backend stores roles as small integers. Only three values mean
/// anything to the client; every other integer (and a missing value) is
/// treated as invalid and can never become a `RoleId`.
///
/// `#[repr(u8)]` pins the discriminants so `RoleId::Admin as i64 == 1`.
/// The serde attributes make a `RoleId` travel as its bare integer, and
/// route deserialization through `TryFrom<i64>` so `9` is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
#[repr(u8)]
pub enum RoleId {
    Admin = 1,
    Authority = 2,
    Client = 3,
}

impl RoleId {
    /// Every recognized role, in id order.
    pub const ALL: [RoleId; 3] = [Self::Admin, Self::Authority, Self::Client];

    /// Validates a raw id. Returns `None` for anything outside {1, 2, 3}.
    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            1 => Some(Self::Admin),
            2 => Some(Self::Authority),
            3 => Some(Self::Client),
            _ => None,
        }
    }

    /// The integer the backend uses for this role.
    pub fn as_raw(self) -> i64 {
        self as i64
    }
}

impl TryFrom<i64> for RoleId {
    type Error = UnknownRole;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::from_raw(raw).ok_or(UnknownRole(raw))
    }
}

impl From<RoleId> for i64 {
    fn from(role: RoleId) -> Self {
        role.as_raw()
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "Admin"),
            Self::Authority => write!(f, "Authority"),
            Self::Client => write!(f, "Client"),
        }
    }
}

// ---------------------------------------------------------------------------
// RolePayload
// ---------------------------------------------------------------------------

/// The body returned by the role-lookup endpoint.
///
/// The id is kept raw (`Option<i64>`) on purpose: decoding must not fail
/// just because the backend sent a role the client doesn't know. The
/// resolver decides what an unknown or missing id means.
///
/// Older backends name the field `rous_id`; it's accepted as an alias.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePayload {
    #[serde(rename = "roleId", alias = "rous_id", default)]
    pub role_id: Option<i64>,
}

impl RolePayload {
    /// A payload carrying the given raw id.
    pub fn new(role_id: i64) -> Self {
        Self {
            role_id: Some(role_id),
        }
    }

    /// The validated role, or `None` if the id is missing or unrecognized.
    pub fn role(&self) -> Option<RoleId> {
        self.role_id.and_then(RoleId::from_raw)
    }

    /// Decodes a JSON body such as `{"roleId": 2}`.
    #[cfg(feature = "json")]
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}
