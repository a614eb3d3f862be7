//! WorkersAiProvider -- concrete [`LlmProvider`] implementation for
//! Cloudflare Workers AI.
//!
//! Sends requests to the Workers AI run endpoint
//! (`/client/v4/accounts/{account}/ai/run/{model}`) with bearer
//! authentication. Non-streaming only: the relay treats inference as an
//! atomic call that returns a reply string or fails.
//!
//! The API token is wrapped in [`secrecy::SecretString`] and is never
//! logged or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use askcampus_core::llm::provider::LlmProvider;
use askcampus_types::llm::{GenerationRequest, LlmError};

/// Cloudflare Workers AI provider.
///
/// # API Token Security
///
/// Does NOT derive Debug to prevent accidental exposure of the token
/// held inside the struct.
pub struct WorkersAiProvider {
    client: reqwest::Client,
    api_token: SecretString,
    account_id: String,
    base_url: String,
}

impl WorkersAiProvider {
    /// Create a new Workers AI provider.
    ///
    /// # Arguments
    ///
    /// * `api_token` - Cloudflare API token wrapped in SecretString
    /// * `account_id` - Cloudflare account id owning the AI binding
    /// * `timeout` - per-request timeout for the inference HTTP call
    pub fn new(api_token: SecretString, account_id: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_token,
            account_id,
            base_url: "https://api.cloudflare.com/client/v4".to_string(),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Build the run URL for a model.
    fn run_url(&self, model: &str) -> String {
        format!(
            "{}/accounts/{}/ai/run/{}",
            self.base_url, self.account_id, model
        )
    }

    /// Convert a generic [`GenerationRequest`] into the Workers AI body:
    /// the system instruction plus the prompt as the sole user message.
    fn to_run_body(request: &GenerationRequest) -> RunRequest {
        RunRequest {
            messages: vec![
                RunMessage {
                    role: "system".to_string(),
                    content: request.system.clone(),
                },
                RunMessage {
                    role: "user".to_string(),
                    content: request.input.clone(),
                },
            ],
        }
    }
}

impl LlmProvider for WorkersAiProvider {
    fn name(&self) -> &str {
        "workers-ai"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        let body = Self::to_run_body(request);
        let url = self.run_url(&request.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_token.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                400 => LlmError::InvalidRequest(error_body),
                401 | 403 => LlmError::AuthenticationFailed,
                429 => LlmError::RateLimited,
                _ => LlmError::Provider {
                    message: format!("HTTP {status}: {error_body}"),
                },
            });
        }

        let run_resp: RunResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        if !run_resp.success {
            let messages: Vec<String> = run_resp.errors.iter().map(|e| e.message.clone()).collect();
            return Err(LlmError::Provider {
                message: messages.join("; "),
            });
        }

        match run_resp.result {
            Some(result) => Ok(result.response),
            None => Err(LlmError::Deserialization(
                "response envelope missing result".to_string(),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Workers AI wire types
//
// These are endpoint-specific request/response structures, NOT the generic
// LLM types from askcampus-types.
// ---------------------------------------------------------------------------

/// Request body for the Workers AI run endpoint.
#[derive(Debug, Clone, Serialize)]
struct RunRequest {
    messages: Vec<RunMessage>,
}

/// A single message in a Workers AI run request.
#[derive(Debug, Clone, Serialize)]
struct RunMessage {
    role: String,
    content: String,
}

/// Response envelope from the Workers AI run endpoint.
#[derive(Debug, Clone, Deserialize)]
struct RunResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    errors: Vec<RunError>,
    result: Option<RunResult>,
}

/// The inference result inside a successful envelope.
#[derive(Debug, Clone, Deserialize)]
struct RunResult {
    response: String,
}

/// An error entry inside a failed envelope.
#[derive(Debug, Clone, Deserialize)]
struct RunError {
    #[serde(default)]
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> WorkersAiProvider {
        WorkersAiProvider::new(
            SecretString::from("test-token"),
            "acct-1".to_string(),
            Duration::from_secs(30),
        )
    }

    #[test]
    fn test_run_url_layout() {
        let p = provider();
        assert_eq!(
            p.run_url("@cf/meta/llama-3.3-70b-instruct-fp8-fast"),
            "https://api.cloudflare.com/client/v4/accounts/acct-1/ai/run/@cf/meta/llama-3.3-70b-instruct-fp8-fast"
        );
    }

    #[test]
    fn test_run_body_is_system_plus_single_user_block() {
        let request = GenerationRequest {
            model: "m".to_string(),
            system: "Be concise.".to_string(),
            input: "user: hi\n".to_string(),
        };
        let body = WorkersAiProvider::to_run_body(&request);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "messages": [
                    {"role": "system", "content": "Be concise."},
                    {"role": "user", "content": "user: hi\n"}
                ]
            })
        );
    }

    #[test]
    fn test_response_envelope_parses() {
        let json = r#"{"result":{"response":"hello"},"success":true,"errors":[],"messages":[]}"#;
        let parsed: RunResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.result.unwrap().response, "hello");
    }

    #[test]
    fn test_error_envelope_parses() {
        let json = r#"{"result":null,"success":false,"errors":[{"code":7000,"message":"no route"}]}"#;
        let parsed: RunResponse = serde_json::from_str(json).unwrap();
        assert!(!parsed.success);
        assert_eq!(parsed.errors[0].message, "no route");
    }
}
