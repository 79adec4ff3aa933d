//! Unified error type for Rolegate.

use rolegate_controller::{ControllerError, NavigationError};
use rolegate_session::SessionError;

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The input isn't valid JSON for [`RolegateConfig`](crate::RolegateConfig).
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration parsed but can't be used.
    #[error(transparent)]
    Invalid(#[from] ControllerError),
}

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant auto-generates `From` impls,
/// so the `?` operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum RolegateError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A controller could not be spawned or has been torn down.
    #[error(transparent)]
    Controller(#[from] ControllerError),

    /// A session collaborator failed (only seen by code calling the
    /// collaborators directly; the resolver absorbs these).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A navigator failed (only seen by code calling it directly).
    #[error(transparent)]
    Navigation(#[from] NavigationError),
}
