//! Configuration loading: `comic.toml` plus environment overrides.

use std::path::Path;

use store::ComicConfig;

pub const ENV_AUTH_URL: &str = "COMIC_AUTH_URL";
pub const ENV_USER_DATA_URL: &str = "COMIC_USER_DATA_URL";
pub const ENV_GENERATE_URL: &str = "COMIC_GENERATE_URL";

/// Errors raised while reading `comic.toml`.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Load the client configuration.
///
/// Reads `path` when it exists (a missing file means defaults), loads `.env`
/// via `dotenvy`, then applies `COMIC_*_URL` overrides.
pub fn load(path: &Path) -> Result<ComicConfig, SettingsError> {
    let mut config = match std::fs::read_to_string(path) {
        Ok(raw) => ComicConfig::from_toml(&raw).map_err(|source| SettingsError::Parse {
            path: path.display().to_string(),
            source,
        })?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            ComicConfig::default()
        }
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.display().to_string(),
                source,
            })
        }
    };

    dotenvy::dotenv().ok();
    apply_env(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Overwrite endpoint URLs with any non-empty values from `lookup`.
pub fn apply_env(config: &mut ComicConfig, lookup: impl Fn(&str) -> Option<String>) {
    let endpoints = &mut config.endpoints;
    for (key, slot) in [
        (ENV_AUTH_URL, &mut endpoints.auth),
        (ENV_USER_DATA_URL, &mut endpoints.user_data),
        (ENV_GENERATE_URL, &mut endpoints.generate),
    ] {
        if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
            *slot = value;
        }
    }
}
