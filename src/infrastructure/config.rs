use crate::application::session_service::SessionSettings;
use crate::domain::history::CHART_CAPACITY;
use crate::domain::log::LOG_CAPACITY;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    #[serde(default = "default_bridge_url")]
    pub bridge_url: String,
    #[serde(default = "default_baudrate")]
    pub default_baudrate: u32,
    #[serde(default = "default_baud_rates")]
    pub baud_rates: Vec<u32>,
    #[serde(default = "default_demo_period_ms")]
    pub demo_period_ms: u64,
    #[serde(default = "default_chart_capacity")]
    pub chart_capacity: usize,
    #[serde(default = "default_log_capacity")]
    pub log_capacity: usize,
}

fn default_bridge_url() -> String {
    "ws://localhost:8765".to_string()
}

fn default_baudrate() -> u32 {
    115200
}

fn default_baud_rates() -> Vec<u32> {
    vec![9600, 19200, 38400, 57600, 115200]
}

fn default_demo_period_ms() -> u64 {
    100
}

fn default_chart_capacity() -> usize {
    CHART_CAPACITY
}

fn default_log_capacity() -> usize {
    LOG_CAPACITY
}

impl DashboardConfig {
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            chart_capacity: self.chart_capacity,
            log_capacity: self.log_capacity,
            demo_period: Duration::from_millis(self.demo_period_ms),
        }
    }

    fn validate(self) -> anyhow::Result<Self> {
        anyhow::ensure!(self.chart_capacity >= 1, "chart_capacity must be at least 1");
        anyhow::ensure!(self.log_capacity >= 1, "log_capacity must be at least 1");
        anyhow::ensure!(self.demo_period_ms >= 1, "demo_period_ms must be at least 1");
        Ok(self)
    }
}

/// Load `config/dashboard.*` (optional) with `GYRO_DASHBOARD_*` environment
/// overrides on top.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("GYRO_DASHBOARD")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("baud_rates"),
        )
        .build()?;

    settings.try_deserialize::<DashboardConfig>()?.validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(text: &str) -> anyhow::Result<DashboardConfig> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(text, config::FileFormat::Toml))
            .build()?;
        settings.try_deserialize::<DashboardConfig>()?.validate()
    }

    #[test]
    fn test_defaults() {
        let config = from_toml("").unwrap();
        assert_eq!(config.bridge_url, "ws://localhost:8765");
        assert_eq!(config.default_baudrate, 115200);
        assert_eq!(config.chart_capacity, 50);
        assert_eq!(config.log_capacity, 100);

        let settings = config.session_settings();
        assert_eq!(settings.demo_period, Duration::from_millis(100));
    }

    #[test]
    fn test_overrides_from_file() {
        let config = from_toml(
            r#"
            bridge_url = "ws://10.0.0.2:8765"
            baud_rates = [9600, 230400]
            demo_period_ms = 50
            "#,
        )
        .unwrap();
        assert_eq!(config.bridge_url, "ws://10.0.0.2:8765");
        assert_eq!(config.baud_rates, vec![9600, 230400]);
        assert_eq!(config.session_settings().demo_period, Duration::from_millis(50));
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        let err = from_toml("chart_capacity = 0").unwrap_err();
        assert!(err.to_string().contains("chart_capacity"));
    }
}
