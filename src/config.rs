//! Server configuration from the environment.

use std::str::FromStr;
use std::time::Duration;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_INACTIVITY_HOURS: u64 = 12;
const DEFAULT_CLEANUP_INTERVAL_MINUTES: u64 = 30;

/// Where to listen and how long idle tournaments are kept.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Tournaments not accessed for this long are removed.
    pub inactivity_timeout: Duration,
    pub cleanup_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            inactivity_timeout: Duration::from_secs(DEFAULT_INACTIVITY_HOURS * 3600),
            cleanup_interval: Duration::from_secs(DEFAULT_CLEANUP_INTERVAL_MINUTES * 60),
        }
    }
}

impl ServerConfig {
    /// Read HOST, PORT, INACTIVITY_HOURS and CLEANUP_INTERVAL_MINUTES; defaults otherwise.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT);
        let inactivity_hours = parse_or(&lookup, "INACTIVITY_HOURS", DEFAULT_INACTIVITY_HOURS);
        let cleanup_minutes = parse_or(
            &lookup,
            "CLEANUP_INTERVAL_MINUTES",
            DEFAULT_CLEANUP_INTERVAL_MINUTES,
        )
        .max(1);
        Self {
            host,
            port,
            inactivity_timeout: scaled_secs(
                "INACTIVITY_HOURS",
                inactivity_hours,
                3600,
                DEFAULT_INACTIVITY_HOURS,
            ),
            cleanup_interval: scaled_secs(
                "CLEANUP_INTERVAL_MINUTES",
                cleanup_minutes,
                60,
                DEFAULT_CLEANUP_INTERVAL_MINUTES,
            ),
        }
    }
}

/// `value` units of `unit_secs` seconds each; the default when that does not fit in a u64.
fn scaled_secs(key: &str, value: u64, unit_secs: u64, default: u64) -> Duration {
    match value.checked_mul(unit_secs) {
        Some(secs) => Duration::from_secs(secs),
        None => {
            log::warn!("Ignoring out-of-range {}={}, using {}", key, value, default);
            Duration::from_secs(default * unit_secs)
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + std::fmt::Display + Copy,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
            default
        }),
    }
}
