//! Environment-sourced configuration loading.
//!
//! The pipeline is configured once at startup from environment variables
//! (optionally populated from a `.env` file by the caller) and the result is
//! passed to components as an explicit [`CheckConfig`]. Invalid numeric
//! values are warned about and ignored; an invalid DNS record selector is a
//! hard configuration error because it would silently change what
//! "registered" means.

use crate::error::TypoCheckError;
use crate::types::{CheckConfig, RecordSelector};
use std::env;
use std::time::Duration;
use tracing::{debug, warn};

/// Raw environment variable values that mirror the pipeline settings.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub typo_count: Option<usize>,
    pub dns_type: Option<String>,
    pub generation_timeout_secs: Option<u64>,
    pub whois_delay_secs: Option<f64>,
}

/// Load configuration from environment variables.
///
/// Recognized variables: `OPENAI_API_KEY`, `OPENAI_MODEL`, `TYPO_COUNT`,
/// `DNS_TYPE`, `OPENAI_TIMEOUT`, `WHOIS_DELAY`. Values that fail to parse
/// are logged and skipped so one bad variable doesn't take the run down.
pub fn load_env_config() -> EnvConfig {
    let mut env_config = EnvConfig::default();

    if let Ok(key) = env::var("OPENAI_API_KEY") {
        if !key.trim().is_empty() {
            env_config.api_key = Some(key);
            debug!("Using OPENAI_API_KEY from environment");
        }
    }

    if let Ok(model) = env::var("OPENAI_MODEL") {
        if !model.trim().is_empty() {
            debug!("Using OPENAI_MODEL={}", model);
            env_config.model = Some(model);
        }
    }

    // TYPO_COUNT - variants requested per domain
    if let Ok(val) = env::var("TYPO_COUNT") {
        match val.parse::<usize>() {
            Ok(count) if count > 0 => {
                debug!("Using TYPO_COUNT={}", count);
                env_config.typo_count = Some(count);
            }
            _ => {
                warn!("Invalid TYPO_COUNT='{}', must be a positive integer", val);
            }
        }
    }

    // DNS_TYPE - record selector, validated later so a bad value errors
    // instead of being silently dropped
    if let Ok(dns_type) = env::var("DNS_TYPE") {
        if !dns_type.trim().is_empty() {
            debug!("Using DNS_TYPE={}", dns_type);
            env_config.dns_type = Some(dns_type);
        }
    }

    // OPENAI_TIMEOUT - generation call timeout in seconds
    if let Ok(val) = env::var("OPENAI_TIMEOUT") {
        match val.parse::<u64>() {
            Ok(secs) if secs > 0 => {
                debug!("Using OPENAI_TIMEOUT={}", secs);
                env_config.generation_timeout_secs = Some(secs);
            }
            _ => {
                warn!("Invalid OPENAI_TIMEOUT='{}', must be a positive integer", val);
            }
        }
    }

    // WHOIS_DELAY - seconds between registrant lookups, fractional allowed
    if let Ok(val) = env::var("WHOIS_DELAY") {
        match val.parse::<f64>() {
            Ok(secs) if secs >= 0.0 && secs.is_finite() => {
                debug!("Using WHOIS_DELAY={}", secs);
                env_config.whois_delay_secs = Some(secs);
            }
            _ => {
                warn!("Invalid WHOIS_DELAY='{}', must be a non-negative number", val);
            }
        }
    }

    env_config
}

impl EnvConfig {
    /// Overlay these environment values onto a base configuration.
    ///
    /// Returns an error only for values that cannot be safely ignored
    /// (currently just an unparseable `DNS_TYPE`).
    pub fn apply_to(self, mut config: CheckConfig) -> Result<CheckConfig, TypoCheckError> {
        if let Some(api_key) = self.api_key {
            config.api_key = api_key;
        }
        if let Some(model) = self.model {
            config.model = model;
        }
        if let Some(count) = self.typo_count {
            config.typo_count = count;
        }
        if let Some(dns_type) = self.dns_type {
            config.record_selector = RecordSelector::parse(&dns_type)?;
        }
        if let Some(secs) = self.generation_timeout_secs {
            config.generation_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = self.whois_delay_secs {
            config.whois_delay = Duration::from_secs_f64(secs);
        }
        Ok(config)
    }
}

/// Build a [`CheckConfig`] from defaults plus the process environment.
pub fn config_from_env() -> Result<CheckConfig, TypoCheckError> {
    load_env_config().apply_to(CheckConfig::default())
}
