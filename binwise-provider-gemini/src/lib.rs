//! Footprint scorer using the Gemini `generateContent` REST API.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use binwise_core::{
    footprint::{FootprintReport, build_prompt, parse_report},
    ports::{FootprintPort, PortError},
    quiz::QuizAnswers,
};

/// Public Gemini endpoint.
pub const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

const TEMPERATURE: f32 = 0.2;

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize)]
struct TextPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    response_mime_type: &'static str,
}

/// Response body; only the generated text is modelled.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateRequest {
    fn new(prompt: String) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![TextPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                response_mime_type: "application/json",
            },
        }
    }
}

impl GenerateResponse {
    /// First text part of the first candidate.
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

/// Footprint scorer backed by Gemini.
pub struct GeminiFootprintPort {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiFootprintPort {
    /// Create a scorer for the given API key and model.
    #[must_use]
    pub fn new(client: Client, api_key: String, model: String) -> Self {
        Self {
            client,
            api_key,
            model,
            base_url: BASE_URL.to_owned(),
        }
    }

    /// Point the scorer at a different API root, e.g. a proxy.
    #[must_use]
    pub fn with_base_url<U: Into<String>>(mut self, base_url: U) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl FootprintPort for GeminiFootprintPort {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn score(&self, answers: &QuizAnswers) -> Result<FootprintReport, PortError> {
        let prompt = build_prompt(answers)?;
        debug!(model = %self.model, prompt_len = prompt.len(), "requesting footprint score");

        let req = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&GenerateRequest::new(prompt));

        let resp = fetch_json::<GenerateResponse>(req).await?;
        let text = resp.into_text().ok_or(PortError::EmptyResponse)?;
        parse_report(&text)
    }
}

/// Convenience constructor returning the scorer behind the port trait.
#[must_use]
pub fn port(client: Client, api_key: String, model: String) -> Arc<dyn FootprintPort> {
    Arc::new(GeminiFootprintPort::new(client, api_key, model))
}

async fn fetch_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, PortError> {
    req.send()
        .await
        .map_err(PortError::from)?
        .error_for_status()
        .map_err(PortError::from)?
        .json()
        .await
        .map_err(PortError::from)
}
