//! Dashboard configuration
//!
//! Defines all configurable parameters for the orchestration layer including
//! the poll interval, the chart window, and the backend connection settings.

use std::time::Duration;

/// Dashboard configuration
///
/// Intervals and windows are configurable rather than hard-coded so they can
/// be tuned per deployment (dev vs prod, fast vs slow backends).
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL (e.g., "http://localhost:8000")
    pub base_url: String,

    /// Field whose data the dashboard shows
    pub field_id: i64,

    /// How often to poll a background task for status
    pub poll_interval: Duration,

    /// Trailing window of the time-series chart, in hours
    pub chart_hours: u32,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            field_id: 1,
            poll_interval: Duration::from_millis(2000),
            chart_hours: 24,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - CROPLENS_API_URL (required)
    /// - CROPLENS_FIELD_ID (optional, default: 1)
    /// - CROPLENS_POLL_INTERVAL_MS (optional, default: 2000)
    /// - CROPLENS_CHART_HOURS (optional, default: 24)
    pub fn from_env() -> anyhow::Result<Self> {
        let base_url = std::env::var("CROPLENS_API_URL")
            .map_err(|_| anyhow::anyhow!("CROPLENS_API_URL environment variable not set"))?;

        let field_id = std::env::var("CROPLENS_FIELD_ID")
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .unwrap_or(1);

        let poll_interval = std::env::var("CROPLENS_POLL_INTERVAL_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(2000));

        let chart_hours = std::env::var("CROPLENS_CHART_HOURS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(24);

        Ok(Self {
            base_url,
            field_id,
            poll_interval,
            chart_hours,
        })
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.base_url.is_empty() {
            anyhow::bail!("base_url cannot be empty");
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!("base_url must start with http:// or https://");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.chart_hours == 0 {
            anyhow::bail!("chart_hours must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("http://localhost:8000".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.poll_interval, Duration::from_millis(2000));
        assert_eq!(config.chart_hours, 24);
        assert_eq!(config.field_id, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        assert!(config.validate().is_ok());

        config.base_url = "not-a-url".to_string();
        assert!(config.validate().is_err());

        config.base_url = "http://localhost:8000".to_string();
        config.poll_interval = Duration::ZERO;
        assert!(config.validate().is_err());

        config.poll_interval = Duration::from_millis(500);
        config.chart_hours = 0;
        assert!(config.validate().is_err());
    }
}
