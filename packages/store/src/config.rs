//! # Client configuration: `comic.toml`
//!
//! Defines the TOML file the client reads at startup (filename:
//! [`ComicConfig::filename`] = `"comic.toml"`). It tells the client where the
//! three remote functions live and tunes request timeouts and the editor's
//! simulated progress indicator.
//!
//! ## Structure
//!
//! ```toml
//! [endpoints]
//! auth = "https://functions.example.dev/auth"
//! user_data = "https://functions.example.dev/user-data"
//! generate = "https://functions.example.dev/generate-comic"
//!
//! [client]
//! request_timeout_secs = 30      # 0 disables the timeout
//! generation_timeout_secs = 120
//!
//! [generation]
//! progress_tick_ms = 500
//! progress_cap = 90
//! reset_delay_ms = 1000
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`ComicConfig`] | Top-level config with builder helpers and TOML (de)serialisation. |
//! | [`EndpointsConfig`] | Base URLs of the auth, user-data and generation services. |
//! | [`ClientConfig`] | HTTP timeouts. |
//! | [`GenerationConfig`] | Tick interval, cap and reset delay of the simulated progress. |
//!
//! Every section derives `Default`, so a missing or empty file is equivalent
//! to the default configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `comic.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ComicConfig {
    #[serde(default)]
    pub endpoints: EndpointsConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
}

/// Base URLs of the remote functions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EndpointsConfig {
    #[serde(default = "default_auth_url")]
    pub auth: String,
    #[serde(default = "default_user_data_url")]
    pub user_data: String,
    #[serde(default = "default_generate_url")]
    pub generate: String,
}

fn default_auth_url() -> String {
    "http://localhost:8080/auth".to_string()
}

fn default_user_data_url() -> String {
    "http://localhost:8080/user-data".to_string()
}

fn default_generate_url() -> String {
    "http://localhost:8080/generate-comic".to_string()
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            auth: default_auth_url(),
            user_data: default_user_data_url(),
            generate: default_generate_url(),
        }
    }
}

/// HTTP client settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Timeout for auth and user-data calls in seconds. 0 disables it.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Timeout for a generation call in seconds. 0 disables it.
    #[serde(default = "default_generation_timeout")]
    pub generation_timeout_secs: u64,
}

fn default_request_timeout() -> u64 {
    30
}

fn default_generation_timeout() -> u64 {
    120
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout(),
            generation_timeout_secs: default_generation_timeout(),
        }
    }
}

/// Simulated generation progress.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_progress_tick")]
    pub progress_tick_ms: u64,
    /// Upper bound of the estimate while the request is pending (percent).
    #[serde(default = "default_progress_cap")]
    pub progress_cap: f32,
    /// Delay before progress drops back to zero after a run settles.
    #[serde(default = "default_reset_delay")]
    pub reset_delay_ms: u64,
}

fn default_progress_tick() -> u64 {
    500
}

fn default_progress_cap() -> f32 {
    90.0
}

fn default_reset_delay() -> u64 {
    1000
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            progress_tick_ms: default_progress_tick(),
            progress_cap: default_progress_cap(),
            reset_delay_ms: default_reset_delay(),
        }
    }
}

impl ComicConfig {
    /// Create a config pointing at the given service URLs.
    pub fn new(auth: String, user_data: String, generate: String) -> Self {
        Self {
            endpoints: EndpointsConfig {
                auth,
                user_data,
                generate,
            },
            ..Self::default()
        }
    }

    /// Builder method to set the auth/user-data request timeout.
    pub fn with_request_timeout(mut self, secs: u64) -> Self {
        self.client.request_timeout_secs = secs;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "comic.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
