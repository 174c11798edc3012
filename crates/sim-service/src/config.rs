use std::collections::HashMap;
use std::env;
use thiserror::Error;

/// Default interval between OTLP metric exports, in seconds.
pub const DEFAULT_EXPORT_INTERVAL_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    /// Value of the `service` attribute on every emitted metric point.
    pub service_name: String,
    /// Value of the `environment` attribute on every emitted metric point.
    pub environment: String,
    pub bind_address: String,
    /// OTLP collector endpoint. When unset, instruments still register but
    /// nothing is exported.
    pub otlp_endpoint: Option<String>,
    pub export_interval_secs: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing)
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let service_name = vars
            .get("SERVICE_NAME")
            .cloned()
            .unwrap_or_else(|| "poc-metrics-backend".to_string());

        let environment = vars
            .get("ENVIRONMENT")
            .cloned()
            .unwrap_or_else(|| "local".to_string());

        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| "0.0.0.0:8080".to_string());

        let otlp_endpoint = vars.get("OTLP_ENDPOINT").cloned();

        let export_interval_secs = match vars.get("METRICS_EXPORT_INTERVAL_SECS") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                name: "METRICS_EXPORT_INTERVAL_SECS".to_string(),
                value: raw.clone(),
            })?,
            None => DEFAULT_EXPORT_INTERVAL_SECS,
        };

        Ok(Config {
            service_name,
            environment,
            bind_address,
            otlp_endpoint,
            export_interval_secs,
        })
    }
}
