//! Server configuration from environment variables
//!
//! | Variable | Default |
//! |----------|---------|
//! | `HEADUNIT_BIND_ADDR` | `0.0.0.0:5000` |
//! | `HEADUNIT_SIM_ENABLED` | `true` |
//! | `HEADUNIT_SIM_TICK_SECS` | `5` |
//! | `HEADUNIT_SIM_INCOMING_PROBABILITY` | `0.0005` |
//! | `HEADUNIT_SIM_SEED` | random |
//! | `HEADUNIT_AUTO_CONNECT_SECS` | `2` |
//! | `HEADUNIT_AUTO_MISS_SECS` | `15` |

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use headunit::PhoneConfig;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub phone: PhoneConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("HEADUNIT_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("Invalid HEADUNIT_BIND_ADDR")?;

        let mut phone = PhoneConfig::default();

        if let Some(enabled) = parse_var::<bool, _>(&lookup, "HEADUNIT_SIM_ENABLED")? {
            phone.simulator.enabled = enabled;
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "HEADUNIT_SIM_TICK_SECS")? {
            if secs == 0 {
                bail!("HEADUNIT_SIM_TICK_SECS must be greater than 0");
            }
            phone.simulator.tick_interval = Duration::from_secs(secs);
        }
        if let Some(p) = parse_var::<f64, _>(&lookup, "HEADUNIT_SIM_INCOMING_PROBABILITY")? {
            if !(0.0..=1.0).contains(&p) {
                bail!("HEADUNIT_SIM_INCOMING_PROBABILITY must be between 0 and 1, got {}", p);
            }
            phone.simulator.incoming_call_probability = p;
        }
        if let Some(seed) = parse_var::<u64, _>(&lookup, "HEADUNIT_SIM_SEED")? {
            phone.simulator.seed = Some(seed);
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "HEADUNIT_AUTO_CONNECT_SECS")? {
            phone.auto_connect_delay = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "HEADUNIT_AUTO_MISS_SECS")? {
            phone.auto_miss_delay = Duration::from_secs(secs);
        }

        Ok(Self { bind_addr, phone })
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("Invalid {}: {}", key, raw)),
        _ => Ok(None),
    }
}
