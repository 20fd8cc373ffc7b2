/// LLM Client — the single point of entry for all model calls in the outreach service.
///
/// ARCHITECTURAL RULE: No other module may call a provider API directly.
/// Components depend on the `LanguageModel` trait and receive an instance
/// at construction time, so tests can substitute a scripted model.
///
/// No call is retried. A failed call is reported once to the caller.
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("Unknown LLM provider '{0}' (expected 'openai' or 'anthropic')")]
    UnknownProvider(String),
}

/// Hosted model APIs the client can talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    OpenAi,
    Anthropic,
}

impl LlmProvider {
    pub fn default_model(self) -> &'static str {
        match self {
            LlmProvider::OpenAi => DEFAULT_OPENAI_MODEL,
            LlmProvider::Anthropic => DEFAULT_ANTHROPIC_MODEL,
        }
    }

    /// Whether the provider can be asked to return a bare JSON object.
    pub fn supports_json_mode(self) -> bool {
        matches!(self, LlmProvider::OpenAi)
    }
}

impl FromStr for LlmProvider {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(LlmProvider::OpenAi),
            "anthropic" => Ok(LlmProvider::Anthropic),
            other => Err(LlmError::UnknownProvider(other.to_string())),
        }
    }
}

/// Per-call sampling options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionOptions {
    /// Sampling randomness, 0.0 – 1.0.
    pub temperature: f32,
    /// Request a structured-JSON reply where the provider supports it.
    pub json_mode: bool,
    pub system: Option<&'static str>,
}

impl CompletionOptions {
    pub fn new(temperature: f32) -> Self {
        Self {
            temperature: temperature.clamp(0.0, 1.0),
            json_mode: false,
            system: None,
        }
    }

    pub fn json(mut self) -> Self {
        self.json_mode = true;
        self
    }

    pub fn with_system(mut self, system: &'static str) -> Self {
        self.system = Some(system);
        self
    }
}

/// The language-model capability consumed by extraction and generation.
/// Returns the model's text reply, trimmed.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: &str, options: CompletionOptions) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiMessage {
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

impl AnthropicResponse {
    /// Extracts the text content from the first text block.
    fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

/// Both providers wrap failures as `{"error": {"message": ...}}`.
#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The HTTP-backed language model used in production.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    provider: LlmProvider,
    model: String,
    api_key: String,
}

impl LlmClient {
    pub fn new(provider: LlmProvider, api_key: String, model: Option<String>) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            provider,
            model: model.unwrap_or_else(|| provider.default_model().to_string()),
            api_key,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider(&self) -> LlmProvider {
        self.provider
    }

    async fn call_openai(&self, prompt: &str, options: CompletionOptions) -> Result<String, LlmError> {
        let body = openai_request(&self.model, prompt, options);

        let response = self
            .client
            .post(OPENAI_API_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let response = ensure_success(response).await?;
        let parsed: OpenAiResponse = response.json().await?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(LlmError::EmptyContent)
    }

    async fn call_anthropic(
        &self,
        prompt: &str,
        options: CompletionOptions,
    ) -> Result<String, LlmError> {
        if options.json_mode {
            debug!("Anthropic has no JSON response mode; relying on fence stripping");
        }

        let body = AnthropicRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            temperature: options.temperature,
            system: options.system,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let response = ensure_success(response).await?;
        let parsed: AnthropicResponse = response.json().await?;

        debug!(
            "LLM call succeeded: input_tokens={}, output_tokens={}",
            parsed.usage.input_tokens, parsed.usage.output_tokens
        );

        parsed
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

#[async_trait]
impl LanguageModel for LlmClient {
    async fn complete(&self, prompt: &str, options: CompletionOptions) -> Result<String, LlmError> {
        debug!(
            "LLM call: provider={:?} model={} temperature={} json_mode={}",
            self.provider, self.model, options.temperature, options.json_mode
        );

        let text = match self.provider {
            LlmProvider::OpenAi => self.call_openai(prompt, options).await?,
            LlmProvider::Anthropic => self.call_anthropic(prompt, options).await?,
        };

        let text = text.trim();
        if text.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(text.to_string())
    }
}

fn openai_request<'a>(model: &'a str, prompt: &'a str, options: CompletionOptions) -> OpenAiRequest<'a> {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = options.system {
        messages.push(ChatMessage {
            role: "system",
            content: system,
        });
    }
    messages.push(ChatMessage {
        role: "user",
        content: prompt,
    });

    OpenAiRequest {
        model,
        messages,
        temperature: options.temperature,
        response_format: options.json_mode.then_some(ResponseFormat {
            kind: "json_object",
        }),
    }
}

/// Turns a non-2xx response into `LlmError::Api`, preferring the provider's own message.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, LlmError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(LlmError::Api {
        status: status.as_u16(),
        message: api_error_message(&body),
    })
}

fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
/// Applying it to already-unfenced text is a no-op.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
