//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, ports valid)
//! - Validate addresses and URLs before any subsystem uses them
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ServiceConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.port must be non-zero")]
    ZeroPort,

    #[error("agent.heartbeat_interval_secs must be greater than zero")]
    ZeroHeartbeatInterval,

    #[error("agent.request_timeout_secs must be greater than zero")]
    ZeroAgentTimeout,

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("agent.url is not a valid URL: {0}")]
    InvalidAgentUrl(String),

    #[error("observability.metrics_address is not a socket address: {0}")]
    InvalidMetricsAddress(String),
}

/// Check a deserialized configuration for semantic errors.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if config.agent.enabled {
        if config.agent.heartbeat_interval_secs == 0 {
            errors.push(ValidationError::ZeroHeartbeatInterval);
        }
        if config.agent.request_timeout_secs == 0 {
            errors.push(ValidationError::ZeroAgentTimeout);
        }
        if Url::parse(&config.agent.url).is_err() {
            errors.push(ValidationError::InvalidAgentUrl(config.agent.url.clone()));
        }
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ServiceConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ServiceConfig::default();
        config.listener.port = 0;
        config.agent.heartbeat_interval_secs = 0;
        config.agent.url = "not a url".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::ZeroPort));
        assert!(errors.contains(&ValidationError::ZeroHeartbeatInterval));
        assert!(errors.contains(&ValidationError::InvalidAgentUrl("not a url".to_string())));
    }

    #[test]
    fn test_agent_settings_ignored_when_disabled() {
        let mut config = ServiceConfig::default();
        config.agent.enabled = false;
        config.agent.heartbeat_interval_secs = 0;
        config.agent.url = String::new();

        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = ServiceConfig::default();
        config.observability.metrics_address = "nowhere".to_string();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::InvalidMetricsAddress("nowhere".to_string())]
        );
    }
}
