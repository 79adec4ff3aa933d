//! The Rolegate controller.
//!
//! One controller per mounted app shell. It runs as an isolated Tokio
//! task (actor model) that alone owns the [`SessionState`], and the
//! outside world talks to it through a cloneable [`ControllerHandle`].
//!
//! # Key types
//!
//! - [`Controller`]: spawns the actor
//! - [`ControllerHandle`]: invalidate, report navigation, go back, tear down
//! - [`Navigator`]: the trait the host implements to move between screens
//! - [`Screen`]: what the host should render right now
//! - [`ControllerConfig`]: route table and channel sizing
//!
//! [`SessionState`]: rolegate_types::SessionState

mod config;
mod controller;
mod error;
mod navigator;
mod screen;

pub use config::ControllerConfig;
pub use controller::{Controller, ControllerHandle};
pub use error::ControllerError;
pub use navigator::{NavigationError, Navigator};
pub use screen::{
    ControllerMetrics, ControllerSnapshot, InvalidationReason, Screen, Trigger,
};
