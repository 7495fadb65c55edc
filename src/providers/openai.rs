//! OpenAI chat-completions backend.

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::providers::{prompt, Analyzer, AnalyzerOutput};

/// Sampling temperature for both hosted providers; kept low so the
/// report structure stays stable across runs.
pub const TEMPERATURE: f32 = 0.5;

const MAX_TOKENS: u32 = 4096;

pub struct OpenAiAnalyzer {
    api_key: Option<String>,
    base_url: String,
    model: String,
    client: Client,
}

impl OpenAiAnalyzer {
    pub fn new(config: &AppConfig, client: Client) -> Self {
        Self {
            api_key: config.openai_api_key.clone(),
            base_url: config.openai_base_url.clone(),
            model: config.openai_model.clone(),
            client,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

/// Pull the first choice's message content out of a chat response.
fn extract_content(json: &Value) -> Option<&str> {
    json.get("choices")
        .and_then(|choices| choices.as_array())
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
}

impl Analyzer for OpenAiAnalyzer {
    async fn analyze(&self, code: &str) -> Result<AnalyzerOutput, AppError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| AppError::Provider("OPENAI_API_KEY is not configured".to_string()))?;

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: prompt::OPENAI_SYSTEM_ROLE.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt::openai_prompt(code),
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Provider(format!("OpenAI HTTP {status}: {body}")));
        }

        let json: Value = response.json().await?;
        let content = extract_content(&json)
            .ok_or_else(|| AppError::Provider("No content in OpenAI response".to_string()))?;

        Ok(AnalyzerOutput::Report(content.to_string()))
    }
}
