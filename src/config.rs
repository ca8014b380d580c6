use crate::clock::CLOCK_PERIOD;
use crate::core::{Result, SignInError};
use crate::session::SESSION_STORAGE_KEY;
use std::time::Duration;

/// Delay between a successful registration and the close attempt.
pub const CLOSE_DELAY: Duration = Duration::from_secs(3);

/// Controller configuration
///
/// Built with defaults matching the registration page and adjusted through
/// the builder methods.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Base URL of the registration backend
    pub endpoint: String,

    /// Storage key for the session identifier
    pub storage_key: String,

    /// Refresh period of the page clock
    pub clock_period: Duration,

    /// Wait before attempting to close the page after success
    pub close_delay: Duration,
}

impl ControllerConfig {
    /// Create a configuration for the given backend.
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            storage_key: SESSION_STORAGE_KEY.to_string(),
            clock_period: CLOCK_PERIOD,
            close_delay: CLOSE_DELAY,
        }
    }

    /// Set the storage key
    pub fn storage_key(mut self, key: &str) -> Self {
        self.storage_key = key.to_string();
        self
    }

    /// Set the clock refresh period
    pub fn clock_period(mut self, period: Duration) -> Self {
        self.clock_period = period;
        self
    }

    /// Set the delay before the close attempt
    pub fn close_delay(mut self, delay: Duration) -> Self {
        self.close_delay = delay;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.is_empty() {
            return Err(SignInError::ConfigError("endpoint cannot be empty".into()));
        }

        if self.storage_key.is_empty() {
            return Err(SignInError::ConfigError("storage_key cannot be empty".into()));
        }

        if self.clock_period.is_zero() {
            return Err(SignInError::ConfigError("clock_period must be > 0".into()));
        }

        Ok(())
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::new("http://localhost:5000")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ControllerConfig::default();
        assert_eq!(config.storage_key, "lab_session_id");
        assert_eq!(config.clock_period, Duration::from_secs(1));
        assert_eq!(config.close_delay, Duration::from_secs(3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = ControllerConfig::new("http://lab.example.com")
            .storage_key("custom_key")
            .clock_period(Duration::from_millis(500))
            .close_delay(Duration::ZERO);

        assert_eq!(config.endpoint, "http://lab.example.com");
        assert_eq!(config.storage_key, "custom_key");
        assert_eq!(config.clock_period, Duration::from_millis(500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        assert!(ControllerConfig::new("").validate().is_err());
        assert!(ControllerConfig::default().storage_key("").validate().is_err());
        assert!(
            ControllerConfig::default()
                .clock_period(Duration::ZERO)
                .validate()
                .is_err()
        );
    }
}
