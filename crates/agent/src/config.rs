//! Runtime configuration read from the environment.
//!
//! # Environment variables
//!
//! | Variable                        | Required | Default | Description                               |
//! |---------------------------------|----------|---------|-------------------------------------------|
//! | `HEATGUARD_TICK_INTERVAL_SECS`  | no       | `3`     | Seconds between ticks, at most 3600       |
//! | `HEATGUARD_ALERT_WEBHOOK_URL`   | no       | --      | POST alerts here instead of simulating    |
//! | `HEATGUARD_DELIVERY_DELAY_MS`   | no       | `1000`  | Simulated latency, at most 60000          |

use std::time::Duration;

use heatguard_core::error::CoreError;
use heatguard_core::profile::{DwellingType, PersonProfile};

pub const ENV_TICK_INTERVAL_SECS: &str = "HEATGUARD_TICK_INTERVAL_SECS";
pub const ENV_ALERT_WEBHOOK_URL: &str = "HEATGUARD_ALERT_WEBHOOK_URL";
pub const ENV_DELIVERY_DELAY_MS: &str = "HEATGUARD_DELIVERY_DELAY_MS";

/// Default interval between automatic telemetry ticks.
pub const DEFAULT_TICK_INTERVAL_SECS: u64 = 3;

/// Default acknowledgement latency of the simulated transport.
pub const DEFAULT_DELIVERY_DELAY_MS: u64 = 1000;

/// Longest accepted tick interval (one hour).
pub const MAX_TICK_INTERVAL_SECS: u64 = 3600;

/// Longest accepted simulated delivery latency (one minute).
pub const MAX_DELIVERY_DELAY_MS: u64 = 60_000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be an integer between 1 and {max}, got {value:?}")]
    InvalidNumber {
        name: &'static str,
        value: String,
        max: u64,
    },

    #[error("{name} must not be empty")]
    Empty { name: &'static str },
}

/// Where alerts are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportConfig {
    Simulated { delay: Duration },
    Webhook { url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    pub tick_interval: Duration,
    pub transport: TransportConfig,
}

impl AgentConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let tick_secs = parse_bounded(
            ENV_TICK_INTERVAL_SECS,
            lookup(ENV_TICK_INTERVAL_SECS),
            DEFAULT_TICK_INTERVAL_SECS,
            MAX_TICK_INTERVAL_SECS,
        )?;

        let transport = match lookup(ENV_ALERT_WEBHOOK_URL) {
            Some(url) if url.trim().is_empty() => {
                return Err(ConfigError::Empty {
                    name: ENV_ALERT_WEBHOOK_URL,
                })
            }
            Some(url) => TransportConfig::Webhook {
                url: url.trim().to_string(),
            },
            None => {
                let delay_ms = parse_bounded(
                    ENV_DELIVERY_DELAY_MS,
                    lookup(ENV_DELIVERY_DELAY_MS),
                    DEFAULT_DELIVERY_DELAY_MS,
                    MAX_DELIVERY_DELAY_MS,
                )?;
                TransportConfig::Simulated {
                    delay: Duration::from_millis(delay_ms),
                }
            }
        };

        Ok(Self {
            tick_interval: Duration::from_secs(tick_secs),
            transport,
        })
    }
}

/// Parse `raw` as an integer in `1..=max`, or return `default` when unset.
fn parse_bounded(
    name: &'static str,
    raw: Option<String>,
    default: u64,
    max: u64,
) -> Result<u64, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().parse::<u64>() {
        Ok(n) if (1..=max).contains(&n) => Ok(n),
        _ => Err(ConfigError::InvalidNumber {
            name,
            value: raw,
            max,
        }),
    }
}

/// The monitored person for this deployment.
pub fn default_profile() -> Result<PersonProfile, CoreError> {
    PersonProfile::new(
        "Kim Bok-ja",
        75,
        ["hypertension", "diabetes"],
        true,
        DwellingType::RooftopUnit,
        true,
        "010-1234-5678",
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<AgentConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AgentConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.tick_interval, Duration::from_secs(3));
        assert_eq!(
            cfg.transport,
            TransportConfig::Simulated {
                delay: Duration::from_millis(1000)
            }
        );
    }

    #[test]
    fn webhook_url_selects_webhook_transport() {
        let cfg = config(&[(ENV_ALERT_WEBHOOK_URL, " https://example.test/alerts ")]).unwrap();
        assert_eq!(
            cfg.transport,
            TransportConfig::Webhook {
                url: "https://example.test/alerts".to_string()
            }
        );
    }

    #[test]
    fn custom_intervals() {
        let cfg = config(&[
            (ENV_TICK_INTERVAL_SECS, "10"),
            (ENV_DELIVERY_DELAY_MS, "250"),
        ])
        .unwrap();
        assert_eq!(cfg.tick_interval, Duration::from_secs(10));
        assert_eq!(
            cfg.transport,
            TransportConfig::Simulated {
                delay: Duration::from_millis(250)
            }
        );
    }

    #[test]
    fn rejects_zero_and_garbage_intervals() {
        assert_matches!(
            config(&[(ENV_TICK_INTERVAL_SECS, "0")]),
            Err(ConfigError::InvalidNumber { .. })
        );
        assert_matches!(
            config(&[(ENV_TICK_INTERVAL_SECS, "three")]),
            Err(ConfigError::InvalidNumber { .. })
        );
        assert!(config(&[(ENV_DELIVERY_DELAY_MS, "-5")]).is_err());
    }

    #[test]
    fn rejects_intervals_above_the_ceiling() {
        assert_matches!(
            config(&[(ENV_TICK_INTERVAL_SECS, "18446744073709551615")]),
            Err(ConfigError::InvalidNumber { name: ENV_TICK_INTERVAL_SECS, max: 3600, .. })
        );
        assert_matches!(
            config(&[(ENV_TICK_INTERVAL_SECS, "3601")]),
            Err(ConfigError::InvalidNumber { .. })
        );
        assert_matches!(
            config(&[(ENV_DELIVERY_DELAY_MS, "60001")]),
            Err(ConfigError::InvalidNumber { name: ENV_DELIVERY_DELAY_MS, .. })
        );

        let cfg = config(&[(ENV_TICK_INTERVAL_SECS, "3600")]).unwrap();
        assert_eq!(cfg.tick_interval, Duration::from_secs(MAX_TICK_INTERVAL_SECS));
    }

    #[test]
    fn rejects_blank_webhook_url() {
        assert_matches!(
            config(&[(ENV_ALERT_WEBHOOK_URL, "  ")]),
            Err(ConfigError::Empty { .. })
        );
    }

    #[test]
    fn default_profile_is_vulnerable() {
        let p = default_profile().unwrap();
        assert!(p.is_elderly());
        assert!(p.has_conditions());
        assert!(p.lives_alone());
        assert_eq!(p.dwelling_type(), DwellingType::RooftopUnit);
        assert!(p.location_outdoors());
    }
}
