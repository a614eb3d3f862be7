//! Global configuration for the AskCampus relay.
//!
//! Loaded from `{data_dir}/config.toml` by askcampus-infra. Every field has
//! a default so a partial (or absent) file still yields a usable config.

use serde::{Deserialize, Serialize};

/// Global configuration, deserialized from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: String,

    /// Model identifier passed to the inference provider.
    pub model: String,

    /// Cloudflare account id for the Workers AI endpoint.
    pub account_id: String,

    /// Per-request timeout for the inference HTTP call, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8787".to_string(),
            model: "@cf/meta/llama-3.3-70b-instruct-fp8-fast".to_string(),
            account_id: String::new(),
            request_timeout_secs: 300,
        }
    }
}
