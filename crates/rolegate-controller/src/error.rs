//! Error types for the controller layer.

use rolegate_guard::GuardLoop;
use rolegate_types::RouteError;

/// Errors that can occur when configuring or talking to a controller.
///
/// Collaborator failures are not in here: the resolver and the
/// navigation fallback absorb those.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// The controller actor has stopped (teardown, or every handle dropped).
    #[error("controller has been torn down")]
    TornDown,

    /// A configured route lands in the wrong location group.
    #[error(transparent)]
    Routes(#[from] RouteError),

    /// The configured routes would make the guard redirect twice in a row.
    #[error(transparent)]
    Loop(#[from] GuardLoop),
}
