use std::time::Duration;

use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Gemini client for the generateContent REST API
#[derive(Debug)]
pub struct Gemini {
    /// HTTP client for API requests
    client: Client,
    /// Base endpoint URL
    endpoint: String,
    /// API key, passed as a query parameter
    api_key: String,
    /// Model identifier
    model: String,
    /// Per-request timeout for translation calls
    request_timeout: Duration,
    /// Per-request timeout for the connectivity probe
    probe_timeout: Duration,
}

/// Gemini generateContent request
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    /// The conversation contents
    contents: Vec<GeminiContent>,

    /// Safety settings for the request
    #[serde(rename = "safetySettings", skip_serializing_if = "Vec::is_empty")]
    safety_settings: Vec<SafetySetting>,
}

/// One content entry in a Gemini request or response
#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiContent {
    /// The content parts
    pub parts: Vec<GeminiPart>,
}

/// One part of a content entry
#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiPart {
    /// The text of this part
    pub text: String,
}

/// Safety setting entry
#[derive(Debug, Serialize)]
pub struct SafetySetting {
    /// Harm category identifier
    category: String,
    /// Blocking threshold
    threshold: String,
}

/// Gemini generateContent response
#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    /// Generation candidates; may be absent when everything was filtered
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

/// One generation candidate
#[derive(Debug, Deserialize)]
pub struct GeminiCandidate {
    /// The candidate content
    pub content: GeminiContent,
}

impl GeminiRequest {
    /// Create a new request from a single user prompt
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt.into() }],
            }],
            safety_settings: Vec::new(),
        }
    }

    /// Disable safety blocking for every harm category.
    ///
    /// Film dialogue routinely trips the default thresholds.
    pub fn permissive_safety(mut self) -> Self {
        const CATEGORIES: [&str; 4] = [
            "HARM_CATEGORY_HARASSMENT",
            "HARM_CATEGORY_HATE_SPEECH",
            "HARM_CATEGORY_SEXUALLY_EXPLICIT",
            "HARM_CATEGORY_DANGEROUS_CONTENT",
        ];
        self.safety_settings = CATEGORIES
            .iter()
            .map(|category| SafetySetting {
                category: category.to_string(),
                threshold: "BLOCK_NONE".to_string(),
            })
            .collect();
        self
    }
}

impl Gemini {
    /// Create a new Gemini client for one model
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        request_timeout: Duration,
        probe_timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let endpoint = endpoint.into();
        Url::parse(&endpoint)
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint {endpoint}: {e}")))?;

        Ok(Self {
            client: Client::builder()
                .timeout(request_timeout)
                .build()
                .unwrap_or_default(),
            endpoint,
            api_key: api_key.into(),
            model: model.into(),
            request_timeout,
            probe_timeout,
        })
    }

    /// Probe an ordered list of candidate models and return a client for the
    /// first one that answers.
    pub async fn probe_candidates(
        endpoint: &str,
        api_key: &str,
        candidates: &[String],
        request_timeout: Duration,
        probe_timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let clients = candidates
            .iter()
            .map(|model| Self::new(endpoint, api_key, model.as_str(), request_timeout, probe_timeout))
            .collect::<Result<Vec<_>, _>>()?;

        crate::providers::probe_first(clients).await.map_err(|e| {
            error!("All {} candidate model(s) failed the connectivity probe", candidates.len());
            e
        })
    }

    /// URL for this model's generateContent call
    fn request_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.endpoint.trim_end_matches('/'),
            self.model,
            self.api_key
        )
    }

    /// Send one request and decode the response
    async fn send(&self, request: &GeminiRequest, timeout: Duration) -> Result<GeminiResponse, ProviderError> {
        let response = self
            .client
            .post(self.request_url())
            .header("Content-Type", "application/json")
            .timeout(timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 429 {
            let message = Self::error_message(response).await;
            return Err(ProviderError::RateLimitExceeded(message));
        }
        if !status.is_success() {
            let message = Self::error_message(response).await;
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        response
            .json::<GeminiResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }

    /// Pull a readable message out of an error response body
    async fn error_message(response: reqwest::Response) -> String {
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(value) => value
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(|m| m.to_string())
                .unwrap_or(body),
            Err(_) => body,
        }
    }

    /// Extract the generated text from a response, joining candidate parts
    pub fn extract_text(response: &GeminiResponse) -> String {
        response
            .candidates
            .first()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl Provider for Gemini {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let request = GeminiRequest::new(prompt).permissive_safety();
        let response = self.send(&request, self.request_timeout).await?;
        Ok(Self::extract_text(&response))
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let request = GeminiRequest::new("Test");
        self.send(&request, self.probe_timeout).await?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.model
    }
}
