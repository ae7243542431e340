//! Application-level configuration loading: upstream service location and scheduler cadences.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the service looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "PINBALL_KIOSK_CONFIG_PATH";
/// Environment variable that overrides the configured scoring service URL.
const API_BASE_URL_ENV: &str = "PINBALL_API_BASE_URL";

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_REFRESH_PERIOD_TICKS: u32 = 60;
const DEFAULT_REFRESH_TICK_MS: u64 = 1_000;
const DEFAULT_ROTATION_INTERVAL_MS: u64 = 10_000;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// What to do when the refresh countdown elapses while the previous cycle is still running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Re-arm the countdown but do not start a second cycle.
    #[default]
    Skip,
    /// Start another cycle anyway; whichever finishes last is published.
    Overlap,
}

#[derive(Debug, Clone, PartialEq)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    pub api_base_url: String,
    /// Number of refresh ticks between two refresh cycles.
    pub refresh_period_ticks: u32,
    pub refresh_tick: Duration,
    pub rotation_interval: Duration,
    pub overlap_policy: OverlapPolicy,
    pub request_timeout: Duration,
}

impl AppConfig {
    /// Load the configuration from disk, falling back to built-in defaults, then apply
    /// environment overrides.
    pub fn load() -> Self {
        let path = resolve_config_path();
        let config = match fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(config) => {
                    info!(
                        path = %path.display(),
                        api = %config.api_base_url,
                        "loaded kiosk configuration"
                    );
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        };

        config.with_env_overrides()
    }

    /// Parse a JSON document; absent fields take their default value.
    pub fn from_json(contents: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<RawConfig>(contents).map(Into::into)
    }

    fn with_env_overrides(mut self) -> Self {
        if let Some(url) = env::var(API_BASE_URL_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
        {
            self.api_base_url = url;
        }
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        RawConfig::default().into()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    api_base_url: Option<String>,
    refresh_period_ticks: Option<u32>,
    refresh_tick_ms: Option<u64>,
    rotation_interval_ms: Option<u64>,
    overlap_policy: Option<OverlapPolicy>,
    request_timeout_ms: Option<u64>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        Self {
            api_base_url: value
                .api_base_url
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            refresh_period_ticks: value
                .refresh_period_ticks
                .unwrap_or(DEFAULT_REFRESH_PERIOD_TICKS)
                .max(1),
            refresh_tick: millis(value.refresh_tick_ms, DEFAULT_REFRESH_TICK_MS),
            rotation_interval: millis(value.rotation_interval_ms, DEFAULT_ROTATION_INTERVAL_MS),
            overlap_policy: value.overlap_policy.unwrap_or_default(),
            request_timeout: millis(value.request_timeout_ms, DEFAULT_REQUEST_TIMEOUT_MS),
        }
    }
}

/// Millisecond setting as a [`Duration`] of at least 1ms; `tokio::time::interval` rejects zero.
fn millis(value: Option<u64>, default: u64) -> Duration {
    Duration::from_millis(value.unwrap_or(default).max(1))
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
