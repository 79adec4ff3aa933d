//! Controller configuration.

use rolegate_guard::settle;
use rolegate_types::{Location, Resolution, RouteTable};
use serde::{Deserialize, Serialize};

use crate::ControllerError;

/// Configuration for a controller instance.
///
/// Deserializes from partial input: missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// The enumerated paths the guard redirects to.
    pub routes: RouteTable,

    /// Capacity of the handle → actor command channel.
    /// Default: 32. Zero is clamped to 1.
    pub command_buffer: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            routes: RouteTable::default(),
            command_buffer: 32,
        }
    }
}

impl ControllerConfig {
    /// Checks the route table and proves every (resolution, location)
    /// pair settles after at most one redirect. Fixes a zero buffer.
    ///
    /// Called by [`Controller::spawn`](crate::Controller::spawn).
    pub fn validated(mut self) -> Result<Self, ControllerError> {
        if self.command_buffer == 0 {
            tracing::warn!("command_buffer is 0, clamping to 1");
            self.command_buffer = 1;
        }
        self.routes = self.routes.validated()?;
        for resolution in Resolution::all() {
            for location in Location::ALL {
                settle(resolution, location, &self.routes)?;
            }
        }
        Ok(self)
    }
}
