//! Runtime settings, read from `ELPRICE_*` environment variables.
//!
//! Every field defaults to the value the forwarder has always used, so an
//! empty environment reproduces the fixed endpoint and API address.

use std::net::SocketAddr;
use std::time::Duration;

use energifyn_api::{DEFAULT_MAX_BODY_BYTES, DEFAULT_TIMEOUT};

use crate::error::ElpriceError;
use crate::report::DEFAULT_SERVER_ADDR;

pub const DEFAULT_API_BASE_URL: &str = "https://api.energifyn.dk";

pub const ENV_API_BASE_URL: &str = "ELPRICE_API_BASE_URL";
pub const ENV_SERVER_ADDR: &str = "ELPRICE_SERVER_ADDR";
pub const ENV_MAX_BODY_BYTES: &str = "ELPRICE_MAX_BODY_BYTES";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "ELPRICE_REQUEST_TIMEOUT_SECS";
pub const ENV_FAILURE_DELAY_SECS: &str = "ELPRICE_FAILURE_DELAY_SECS";
pub const ENV_ALIGN_START: &str = "ELPRICE_ALIGN_START";

/// Resolved settings for one process.
#[derive(Debug, Clone, PartialEq)]
pub struct ElpriceConfig {
    pub api_base_url: String,
    pub server_addr: SocketAddr,
    pub max_body_bytes: usize,
    /// `None` waits on the price API indefinitely.
    pub request_timeout: Option<Duration>,
    /// Delay before the next attempt after a skipped cycle. `None` waits for the next hour.
    pub failure_delay: Option<Duration>,
    /// Wait for the top of the hour before the first cycle.
    pub align_start: bool,
}

impl Default for ElpriceConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            server_addr: DEFAULT_SERVER_ADDR,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            request_timeout: Some(DEFAULT_TIMEOUT),
            failure_delay: None,
            align_start: false,
        }
    }
}

impl ElpriceConfig {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, ElpriceError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup.
    ///
    /// Numeric values that fail to parse fall back to the default. A server
    /// address that fails to parse is an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ElpriceError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_base_url = lookup(ENV_API_BASE_URL)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.api_base_url);

        let server_addr = match lookup(ENV_SERVER_ADDR) {
            Some(raw) => parse_server_addr(&raw)?,
            None => defaults.server_addr,
        };

        let max_body_bytes = lookup_parsed::<usize, _>(&lookup, ENV_MAX_BODY_BYTES)
            .filter(|n| *n > 0)
            .unwrap_or(defaults.max_body_bytes);

        let request_timeout = match lookup_parsed::<u64, _>(&lookup, ENV_REQUEST_TIMEOUT_SECS) {
            Some(secs) => secs_to_duration(secs),
            None => defaults.request_timeout,
        };

        let failure_delay = lookup_parsed::<u64, _>(&lookup, ENV_FAILURE_DELAY_SECS)
            .and_then(secs_to_duration);

        let align_start = lookup(ENV_ALIGN_START)
            .map(|v| parse_flag(&v))
            .unwrap_or(defaults.align_start);

        Ok(Self {
            api_base_url,
            server_addr,
            max_body_bytes,
            request_timeout,
            failure_delay,
            align_start,
        })
    }

    /// Builds the HTTP client these settings describe.
    pub fn api_client(&self) -> energifyn_api::Client {
        energifyn_api::Client::with_base_url(&self.api_base_url)
            .with_max_body_bytes(self.max_body_bytes)
            .with_timeout(self.request_timeout)
    }
}

/// Parses `ip:port`, as used by `--server` and `ELPRICE_SERVER_ADDR`.
pub fn parse_server_addr(raw: &str) -> Result<SocketAddr, ElpriceError> {
    raw.trim()
        .parse()
        .map_err(|e| ElpriceError::Config(format!("invalid server address {:?}: {}", raw, e)))
}

/// Zero means "disabled".
pub fn secs_to_duration(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

fn lookup_parsed<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|val| val.trim().parse::<T>().ok())
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
