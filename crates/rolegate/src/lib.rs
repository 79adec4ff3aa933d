//! # Rolegate
//!
//! Role-aware navigation gating for multi-role client applications.
//!
//! Rolegate decides, on every trigger, whether the screen the user is on
//! may be shown or must be replaced by a redirect. The application
//! implements three small traits ([`AuthVerifier`], [`RoleProvider`],
//! [`Navigator`]) and renders whatever [`Screen`] the controller
//! publishes; the framework handles ordering, stale results, and loops.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use rolegate::prelude::*;
//!
//! let config = RolegateConfig::from_json(r#"{"controller": {"command_buffer": 16}}"#)?;
//! let resolver = SessionResolver::new(MyVerifier, MyRoles);
//! let handle = Controller::spawn(resolver, Arc::new(MyNavigator), config.controller)?;
//!
//! // Later, from the drawer menu:
//! handle.logout().await?;
//! ```
//!
//! [`AuthVerifier`]: rolegate_session::AuthVerifier
//! [`RoleProvider`]: rolegate_session::RoleProvider
//! [`Navigator`]: rolegate_controller::Navigator
//! [`Screen`]: rolegate_controller::Screen

mod config;
mod error;
pub mod telemetry;

pub use config::RolegateConfig;
pub use error::{ConfigError, RolegateError};

/// Everything an application needs to wire up a controller.
pub mod prelude {
    pub use crate::{ConfigError, RolegateConfig, RolegateError};
    pub use rolegate_controller::{
        Controller, ControllerConfig, ControllerError, ControllerHandle,
        ControllerMetrics, ControllerSnapshot, InvalidationReason,
        NavigationError, Navigator, Screen, Trigger,
    };
    pub use rolegate_guard::{evaluate, settle, view_for, view_for_role, ViewVariant};
    pub use rolegate_session::{
        AuthVerifier, ResolutionTrace, RoleProvider, SessionError,
        SessionResolver,
    };
    pub use rolegate_types::{
        Decision, Location, Redirect, Resolution, RoleId, RolePayload,
        RouteError, RouteTable, SessionState,
    };
}
