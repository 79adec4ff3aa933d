//! The navigation hook the host implements.

/// Errors a [`Navigator`] can report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    /// There is nothing to go back to.
    #[error("no navigation history")]
    NoHistory,

    /// The host's router refused the navigation.
    #[error("navigation rejected: {0}")]
    Rejected(String),
}

/// Moves the host between screens and reports where it is.
///
/// Calls are synchronous and fire-and-forget: `replace` asks the router
/// to navigate, and the host reports the new position later through
/// [`ControllerHandle::navigated`](crate::ControllerHandle::navigated).
pub trait Navigator: Send + Sync + 'static {
    /// Replaces the current screen with `path` (no history entry).
    fn replace(&self, path: &str);

    /// The current position as path segments, e.g. `["(auth)", "sign-in"]`.
    /// The root is an empty list.
    fn current_location(&self) -> Vec<String>;

    /// Goes back one screen.
    fn back(&self) -> Result<(), NavigationError>;
}
