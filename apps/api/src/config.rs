use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::llm_client::LlmProvider;

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm_provider: LlmProvider,
    pub llm_api_key: String,
    /// Overrides the provider's default model when set.
    pub llm_model: Option<String>,
    /// Resume used by `POST /api/v1/outreach/generate` when no upload is given.
    pub resume_path: PathBuf,
    /// Optional `name=value` cookie file for sites that need a session.
    pub cookies_path: Option<PathBuf>,
    pub fetch_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let llm_provider: LlmProvider = std::env::var("LLM_PROVIDER")
            .unwrap_or_else(|_| "openai".to_string())
            .parse()?;

        let llm_api_key = match llm_provider {
            LlmProvider::OpenAi => require_env("OPENAI_API_KEY")?,
            LlmProvider::Anthropic => require_env("ANTHROPIC_API_KEY")?,
        };

        Ok(Config {
            llm_provider,
            llm_api_key,
            llm_model: optional_env("LLM_MODEL"),
            resume_path: optional_env("RESUME_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./resumes/resume.pdf")),
            cookies_path: optional_env("COOKIES_PATH").map(PathBuf::from),
            fetch_timeout_secs: std::env::var("FETCH_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse::<u64>()
                .context("FETCH_TIMEOUT_SECS must be a whole number of seconds")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
