//! Configuration for the Presensi client.

use std::env;
use std::time::Duration;

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Default timeout for the long existence probe in seconds.
const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 20;

/// Client configuration, loadable from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend, stored without a trailing slash
    pub base_url: String,
    /// Timeout applied to regular requests
    pub request_timeout: Duration,
    /// Timeout applied to the existence probe
    pub probe_timeout: Duration,
    /// Skip TLS certificate verification (development backends only)
    pub accept_invalid_certs: bool,
}

impl ClientConfig {
    /// Create a configuration with default timeouts.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize(base_url.into()),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            probe_timeout: Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS),
            accept_invalid_certs: false,
        }
    }

    /// Builder-style override for the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Builder-style override for the probe timeout.
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Builder-style override for TLS certificate checking.
    pub fn with_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// `PRESENSI_BASE_URL` is required. `PRESENSI_TIMEOUT_SECS`,
    /// `PRESENSI_PROBE_TIMEOUT_SECS` and `PRESENSI_ACCEPT_INVALID_CERTS`
    /// override the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url =
            env::var("PRESENSI_BASE_URL").map_err(|_| ConfigError::MissingBaseUrl)?;

        let request_timeout = match env::var("PRESENSI_TIMEOUT_SECS") {
            Ok(raw) => {
                Duration::from_secs(raw.parse().map_err(|_| ConfigError::InvalidTimeout)?)
            }
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let probe_timeout = match env::var("PRESENSI_PROBE_TIMEOUT_SECS") {
            Ok(raw) => {
                Duration::from_secs(raw.parse().map_err(|_| ConfigError::InvalidProbeTimeout)?)
            }
            Err(_) => Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS),
        };

        let accept_invalid_certs = match env::var("PRESENSI_ACCEPT_INVALID_CERTS") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidCertFlag)?,
            Err(_) => false,
        };

        Ok(Self {
            base_url: normalize(base_url),
            request_timeout,
            probe_timeout,
            accept_invalid_certs,
        })
    }
}

fn normalize(base_url: String) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PRESENSI_BASE_URL environment variable is required")]
    MissingBaseUrl,

    #[error("Invalid PRESENSI_TIMEOUT_SECS value")]
    InvalidTimeout,

    #[error("Invalid PRESENSI_PROBE_TIMEOUT_SECS value")]
    InvalidProbeTimeout,

    #[error("Invalid PRESENSI_ACCEPT_INVALID_CERTS value")]
    InvalidCertFlag,
}
