// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Chat-completion client for OpenAI-compatible endpoints.

use serde::Deserialize;
use serde_json::{Value, json};

use crate::config::Config;
use crate::error::{TallyError, TallyResult};
use crate::utils::http_client;

const TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseFormat {
    Text,
    /// Strict structured output validated against `schema` by the server.
    JsonSchema {
        name: String,
        description: String,
        schema: Value,
    },
}

impl ResponseFormat {
    fn to_wire(&self) -> Value {
        match self {
            ResponseFormat::Text => json!({ "type": "text" }),
            ResponseFormat::JsonSchema {
                name,
                description,
                schema,
            } => json!({
                "type": "json_schema",
                "json_schema": {
                    "name": name,
                    "description": description,
                    "schema": schema,
                    "strict": true
                }
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub system: String,
    pub user: String,
    pub format: ResponseFormat,
}

/// Anything that can turn a system + user prompt into reply text.
pub trait TextGenerator {
    fn generate(&self, config: &Config, request: &ChatRequest) -> TallyResult<String>;
}

#[derive(Deserialize)]
struct Completion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct OpenAiClient;

impl OpenAiClient {
    pub fn new() -> Self {
        OpenAiClient
    }
}

impl TextGenerator for OpenAiClient {
    fn generate(&self, config: &Config, request: &ChatRequest) -> TallyResult<String> {
        let key = config.openai_api_key()?;
        let url = format!(
            "{}/chat/completions",
            config.openai_base_url().trim_end_matches('/')
        );
        let body = json!({
            "model": config.openai_model(),
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.user }
            ],
            "response_format": request.format.to_wire()
        });
        tracing::debug!(%url, model = config.openai_model(), "chat completion request");

        let client = http_client(TIMEOUT_SECS)?;
        let resp = client.post(&url).bearer_auth(key).json(&body).send()?;
        let status = resp.status();
        let text = resp.text()?;
        tracing::debug!(%status, bytes = text.len(), "chat completion response");
        if !status.is_success() {
            let msg = serde_json::from_str::<ApiErrorBody>(&text)
                .map(|b| b.error.message)
                .unwrap_or_else(|_| format!("HTTP {}", status));
            return Err(TallyError::Server(msg));
        }
        first_content(&text)
    }
}

/// Content of the first choice; a reply without one is invalid.
pub fn first_content(body: &str) -> TallyResult<String> {
    let completion: Completion = serde_json::from_str(body)?;
    completion
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| TallyError::Decode("Invalid Data".into()))
}
