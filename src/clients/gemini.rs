//! Client for the Gemini `generateContent` endpoint.

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::GeminiConfig;

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("Invalid Gemini endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Gemini request timed out after {0}s")]
    Timeout(u64),

    #[error("Gemini request failed: {0}")]
    Transport(String),

    #[error("Gemini returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Malformed Gemini response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

impl GenerateContentRequest {
    fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: Url,
    timeout_seconds: u64,
}

impl GeminiClient {
    /// Reuses an existing client. `request_timeout_seconds` is applied to every call.
    pub fn with_shared_client(client: Client, config: &GeminiConfig) -> Result<Self, GeminiError> {
        Ok(Self {
            client,
            endpoint: build_endpoint(config)?,
            timeout_seconds: config.request_timeout_seconds,
        })
    }

    /// Sends `prompt` as a single user turn and returns the first candidate's text.
    pub async fn generate_content(&self, prompt: &str) -> Result<String, GeminiError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .timeout(Duration::from_secs(self.timeout_seconds))
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        debug!(status = status.as_u16(), bytes = body.len(), "Gemini responded");

        if !status.is_success() {
            warn!(status = status.as_u16(), "Gemini returned an error status");
            return Err(GeminiError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        extract_text(&body)
    }

    // Strip the URL so the `key` query parameter never reaches logs or clients.
    fn transport_error(&self, err: reqwest::Error) -> GeminiError {
        if err.is_timeout() {
            GeminiError::Timeout(self.timeout_seconds)
        } else {
            GeminiError::Transport(err.without_url().to_string())
        }
    }
}

fn build_endpoint(config: &GeminiConfig) -> Result<Url, GeminiError> {
    let raw = format!(
        "{}/models/{}:generateContent",
        config.base_url.trim_end_matches('/'),
        config.model
    );

    Url::parse_with_params(&raw, &[("key", config.api_key.as_str())])
        .map_err(|e| GeminiError::InvalidEndpoint(format!("{raw}: {e}")))
}

/// Pulls `candidates[0].content.parts[0].text` out of a response body.
fn extract_text(body: &str) -> Result<String, GeminiError> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| GeminiError::MalformedResponse(format!("invalid JSON: {e}")))?;

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| GeminiError::MalformedResponse("no candidates".to_string()))?;

    let content = candidate
        .content
        .ok_or_else(|| GeminiError::MalformedResponse("candidate has no content".to_string()))?;

    content
        .parts
        .into_iter()
        .next()
        .and_then(|part| part.text)
        .ok_or_else(|| GeminiError::MalformedResponse("candidate has no text part".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> GeminiConfig {
        GeminiConfig {
            base_url: base_url.to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key: "secret".to_string(),
            request_timeout_seconds: 5,
        }
    }

    #[test]
    fn endpoint_includes_model_and_key() {
        let url = build_endpoint(&config("https://example.com/v1/")).unwrap();
        assert_eq!(url.path(), "/v1/models/gemini-2.5-flash:generateContent");
        assert_eq!(url.query(), Some("key=secret"));
    }

    #[test]
    fn client_requires_valid_endpoint() {
        let valid = config("https://example.com/v1");
        assert!(GeminiClient::with_shared_client(Client::new(), &valid).is_ok());
        assert!(matches!(
            GeminiClient::with_shared_client(Client::new(), &config("not a url")),
            Err(GeminiError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn endpoint_rejects_garbage_base_url() {
        let err = build_endpoint(&config("not a url")).unwrap_err();
        assert!(matches!(err, GeminiError::InvalidEndpoint(_)));
    }

    #[test]
    fn request_body_shape() {
        let body = serde_json::to_value(GenerateContentRequest::from_prompt("hi")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"contents": [{"parts": [{"text": "hi"}]}]})
        );
    }

    #[test]
    fn extract_text_reads_first_candidate() {
        let body = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "4"}, {"text": "ignored"}], "role": "model"}},
                {"content": {"parts": [{"text": "second"}]}}
            ],
            "usageMetadata": {"totalTokenCount": 3}
        }"#;
        assert_eq!(extract_text(body).unwrap(), "4");
    }

    #[test]
    fn extract_text_reports_missing_structure() {
        for body in [
            "{}",
            r#"{"candidates": []}"#,
            r#"{"candidates": [{"finishReason": "SAFETY"}]}"#,
            r#"{"candidates": [{"content": {"parts": []}}]}"#,
            r#"{"candidates": [{"content": {"parts": [{"inlineData": {}}]}}]}"#,
            "<html>not json</html>",
        ] {
            let err = extract_text(body).unwrap_err();
            assert!(
                matches!(err, GeminiError::MalformedResponse(_)),
                "expected malformed for {body}"
            );
        }
    }

    #[test]
    fn upstream_error_display() {
        let err = GeminiError::Upstream {
            status: 403,
            body: "denied".to_string(),
        };
        assert_eq!(err.to_string(), "Gemini returned 403: denied");
    }
}
