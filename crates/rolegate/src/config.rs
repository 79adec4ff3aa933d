//! Top-level configuration.

use rolegate_controller::ControllerConfig;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Application-wide Rolegate settings.
///
/// ```json
/// {
///   "controller": {
///     "routes": { "home": "/(tabs)/home" },
///     "command_buffer": 32
///   }
/// }
/// ```
///
/// Every field is optional; missing ones take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RolegateConfig {
    pub controller: ControllerConfig,
}

impl RolegateConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(input)?;
        config.validated()
    }

    /// Runs every check the controller would run at spawn time.
    pub fn validated(self) -> Result<Self, ConfigError> {
        Ok(Self {
            controller: self.controller.validated()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use rolegate_controller::ControllerError;
    use rolegate_types::RouteTable;

    use super::*;

    #[test]
    fn test_from_json_empty_object_is_default() {
        let config = RolegateConfig::from_json("{}").unwrap();
        assert_eq!(config, RolegateConfig::default());
    }

    #[test]
    fn test_from_json_custom_routes() {
        let config = RolegateConfig::from_json(
            r#"{"controller": {"routes": {
                "sign_in": "/(login)/start",
                "auth_group_segment": "(login)",
                "home": "/dashboard"
            }}}"#,
        )
        .unwrap();
        assert_eq!(config.controller.routes.home, "/dashboard");
        assert_eq!(config.controller.routes.welcome, RouteTable::default().welcome);
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        assert!(matches!(
            RolegateConfig::from_json("{controller:"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_home_in_auth_group() {
        let result = RolegateConfig::from_json(
            r#"{"controller": {"routes": {"home": "/(auth)/home"}}}"#,
        );
        assert!(matches!(
            result,
            Err(ConfigError::Invalid(ControllerError::Routes(_)))
        ));
    }

    #[test]
    fn test_from_json_clamps_zero_buffer() {
        let config =
            RolegateConfig::from_json(r#"{"controller": {"command_buffer": 0}}"#)
                .unwrap();
        assert_eq!(config.controller.command_buffer, 1);
    }
}
