use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::config::VertexAiConfig;

const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum VertexAiError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Authentication error: {0}")]
    AuthError(String),
    #[error("Response error: {0}")]
    ResponseError(String),
}

/// A generative model that turns a prompt into free text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, VertexAiError>;
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    role: String,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

/// Gemini on Vertex AI over the REST `generateContent` endpoint.
#[derive(Clone)]
pub struct VertexAiClient {
    client: Client,
    config: VertexAiConfig,
}

impl VertexAiClient {
    pub fn new(config: VertexAiConfig) -> Result<Self, VertexAiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "https://{location}-aiplatform.googleapis.com/v1/projects/{project}/locations/{location}/publishers/google/models/{model}:generateContent",
            location = self.config.location,
            project = self.config.project_id,
            model = self.config.model
        )
    }

    async fn access_token(&self) -> Result<String, VertexAiError> {
        if let Some(token) = &self.config.access_token {
            return Ok(token.clone());
        }

        // Falls back to the local gcloud login, as in development setups
        let output = tokio::process::Command::new("gcloud")
            .args(["auth", "print-access-token"])
            .output()
            .await
            .map_err(|e| VertexAiError::AuthError(format!("Failed to run gcloud: {}", e)))?;

        if !output.status.success() {
            return Err(VertexAiError::AuthError(format!(
                "gcloud command failed: {}",
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        String::from_utf8(output.stdout)
            .map(|s| s.trim().to_string())
            .map_err(|e| VertexAiError::AuthError(format!("Invalid UTF-8 in token: {}", e)))
    }
}

#[async_trait]
impl TextGenerator for VertexAiClient {
    async fn generate(&self, prompt: &str) -> Result<String, VertexAiError> {
        let access_token = self.access_token().await?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.7,
                max_output_tokens: 8192,
            },
        };

        log::debug!("Calling Vertex AI model {}", self.config.model);

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(access_token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(VertexAiError::ResponseError(format!(
                "generateContent failed with status {}: {}",
                status, error_text
            )));
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            VertexAiError::ResponseError(format!("Failed to parse response: {}", e))
        })?;

        candidate_text(body)
    }
}

fn candidate_text(body: GenerateContentResponse) -> Result<String, VertexAiError> {
    let candidate = body
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| VertexAiError::ResponseError("No candidates in response".to_string()))?;

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(VertexAiError::ResponseError(format!(
            "Empty candidate (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        )));
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> VertexAiConfig {
        VertexAiConfig {
            project_id: "demo-project".to_string(),
            location: "asia-south1".to_string(),
            model: "gemini-1.5-pro".to_string(),
            access_token: Some("token".to_string()),
        }
    }

    #[test]
    fn test_endpoint_format() {
        let client = VertexAiClient::new(config()).unwrap();
        assert_eq!(
            client.endpoint(),
            "https://asia-south1-aiplatform.googleapis.com/v1/projects/demo-project/locations/asia-south1/publishers/google/models/gemini-1.5-pro:generateContent"
        );
    }

    #[test]
    fn test_candidate_text_joins_parts() {
        let body: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "{\"a\":" }, { "text": " 1}" }] },
                "finishReason": "STOP"
            }]
        }))
        .unwrap();

        assert_eq!(candidate_text(body).unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn test_candidate_text_without_candidates() {
        let body: GenerateContentResponse =
            serde_json::from_value(json!({ "candidates": [] })).unwrap();
        assert!(matches!(
            candidate_text(body),
            Err(VertexAiError::ResponseError(_))
        ));
    }

    #[test]
    fn test_request_serialization() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: Some("hello".to_string()),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.7,
                max_output_tokens: 8192,
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 8192);
    }
}
