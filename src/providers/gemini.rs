//! Gemini generateContent backend.

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::providers::openai::TEMPERATURE;
use crate::providers::{prompt, Analyzer, AnalyzerOutput};

const MAX_OUTPUT_TOKENS: u32 = 8192;

pub struct GeminiAnalyzer {
    api_key: Option<String>,
    base_url: String,
    model: String,
    client: Client,
}

impl GeminiAnalyzer {
    pub fn new(config: &AppConfig, client: Client) -> Self {
        Self {
            api_key: config.gemini_api_key.clone(),
            base_url: config.gemini_base_url.clone(),
            model: config.gemini_model.clone(),
            client,
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

/// Pull the first candidate's text out of a generateContent response.
fn extract_content(json: &Value) -> Option<&str> {
    json.get("candidates")
        .and_then(|candidates| candidates.as_array())
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(|parts| parts.as_array())
        .and_then(|parts| parts.first())
        .and_then(|part| part.get("text"))
        .and_then(|text| text.as_str())
}

impl Analyzer for GeminiAnalyzer {
    async fn analyze(&self, code: &str) -> Result<AnalyzerOutput, AppError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| AppError::Provider("GEMINI_API_KEY is not configured".to_string()))?;

        let request = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: prompt::gemini_prompt(code),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, api_key
        );
        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Provider(format!("Gemini HTTP {status}: {body}")));
        }

        let json: Value = response.json().await?;
        let content = extract_content(&json)
            .ok_or_else(|| AppError::Provider("No content in Gemini response".to_string()))?;

        Ok(AnalyzerOutput::Report(content.to_string()))
    }
}
