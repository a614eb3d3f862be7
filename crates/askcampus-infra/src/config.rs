//! Global configuration loader for AskCampus.
//!
//! Reads `config.toml` from the data directory (`~/.askcampus/` in
//! production) and deserializes it into [`GlobalConfig`]. Falls back to
//! defaults when the file is missing or malformed. The Cloudflare API
//! token comes from the environment, never from the file.

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use askcampus_types::config::GlobalConfig;

/// Environment variable holding the Cloudflare API token.
pub const API_TOKEN_ENV: &str = "CLOUDFLARE_API_TOKEN";

/// Resolve the data directory from `ASKCAMPUS_DATA_DIR`, falling back to
/// `~/.askcampus`.
pub fn resolve_data_dir() -> PathBuf {
    match std::env::var("ASKCAMPUS_DATA_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".askcampus")
        }
    }
}

/// Load global configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`GlobalConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_global_config(data_dir: &Path) -> GlobalConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No config.toml found at {}, using defaults",
                config_path.display()
            );
            return GlobalConfig::default();
        }
        Err(err) => {
            tracing::warn!(
                "Failed to read {}: {err}, using defaults",
                config_path.display()
            );
            return GlobalConfig::default();
        }
    };

    match toml::from_str::<GlobalConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            GlobalConfig::default()
        }
    }
}

/// Read the Cloudflare API token from the environment, if set.
pub fn api_token_from_env() -> Option<SecretString> {
    std::env::var(API_TOKEN_ENV)
        .ok()
        .filter(|token| !token.is_empty())
        .map(SecretString::from)
}
