//! Content generation — turns a `JobRecord` plus resume text into the final
//! documents with one model call.
//!
//! Two modes:
//! - `Extended` (default): JSON reply with `email_content` + `resume_advice`.
//!   Each key falls back to a fixed placeholder, so neither field is ever missing.
//! - `Simple`: plain-text reply used as the email; no advice is produced.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::llm_client::prompts::{build_prompt, NO_INVENTION_INSTRUCTION};
use crate::llm_client::{strip_json_fences, CompletionOptions, LanguageModel, LlmError};
use crate::outreach::job_record::JobRecord;
use crate::outreach::prompts::{
    EXTENDED_GENERATION_PROMPT_TEMPLATE, EXTENDED_GENERATION_TEMPERATURE,
    SIMPLE_GENERATION_PROMPT_TEMPLATE, SIMPLE_GENERATION_TEMPERATURE, UNSTRUCTURED_JOB_PREAMBLE,
};

pub const EMAIL_PLACEHOLDER: &str = "Error: Could not generate email.";
pub const ADVICE_PLACEHOLDER: &str = "Error: Could not generate advice.";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Resume text is empty")]
    EmptyResume,

    #[error("Generation model call failed: {0}")]
    Model(#[from] LlmError),

    #[error("Failed to serialize job record: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    Simple,
    #[default]
    Extended,
}

/// Terminal artifact of a pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeneratedOutput {
    Email {
        email_markdown: String,
    },
    EmailWithAdvice {
        email_markdown: String,
        resume_advice_markdown: String,
    },
}

impl GeneratedOutput {
    pub fn email_markdown(&self) -> &str {
        match self {
            GeneratedOutput::Email { email_markdown }
            | GeneratedOutput::EmailWithAdvice { email_markdown, .. } => email_markdown,
        }
    }

    pub fn resume_advice_markdown(&self) -> Option<&str> {
        match self {
            GeneratedOutput::Email { .. } => None,
            GeneratedOutput::EmailWithAdvice {
                resume_advice_markdown,
                ..
            } => Some(resume_advice_markdown),
        }
    }
}

#[derive(Clone)]
pub struct ContentGenerator {
    llm: Arc<dyn LanguageModel>,
}

impl ContentGenerator {
    pub fn new(llm: Arc<dyn LanguageModel>) -> Self {
        Self { llm }
    }

    pub async fn generate(
        &self,
        job: &JobRecord,
        resume_text: &str,
        mode: GenerationMode,
    ) -> Result<GeneratedOutput, GenerationError> {
        let resume_text = resume_text.trim();
        if resume_text.is_empty() {
            return Err(GenerationError::EmptyResume);
        }

        let job_posting = render_job_posting(job)?;

        match mode {
            GenerationMode::Extended => {
                let prompt = build_generation_prompt(
                    EXTENDED_GENERATION_PROMPT_TEMPLATE,
                    &job_posting,
                    resume_text,
                );
                let options = CompletionOptions::new(EXTENDED_GENERATION_TEMPERATURE).json();
                let reply = self.llm.complete(&prompt, options).await?;
                let output = parse_extended_reply(&reply);
                info!(
                    "Generated email ({} chars) and resume advice ({} chars)",
                    output.email_markdown().len(),
                    output.resume_advice_markdown().map(str::len).unwrap_or(0)
                );
                Ok(output)
            }
            GenerationMode::Simple => {
                let prompt = build_generation_prompt(
                    SIMPLE_GENERATION_PROMPT_TEMPLATE,
                    &job_posting,
                    resume_text,
                );
                let options = CompletionOptions::new(SIMPLE_GENERATION_TEMPERATURE);
                let reply = self.llm.complete(&prompt, options).await?;
                info!("Generated email ({} chars)", reply.len());
                Ok(GeneratedOutput::Email {
                    email_markdown: reply.trim().to_string(),
                })
            }
        }
    }
}

/// Serializes the job for embedding in a prompt. Both record shapes are
/// handled explicitly; the degraded form is labelled so the model knows the
/// fields were not extracted.
pub fn render_job_posting(job: &JobRecord) -> Result<String, serde_json::Error> {
    match job {
        JobRecord::Structured(details) => serde_json::to_string_pretty(details),
        JobRecord::Unstructured { raw_response } => {
            Ok(format!("{UNSTRUCTURED_JOB_PREAMBLE}\n\n{raw_response}"))
        }
    }
}

fn build_generation_prompt(template: &str, job_posting: &str, resume_text: &str) -> String {
    build_prompt(
        template,
        &[
            ("job_posting", job_posting),
            ("resume_text", resume_text),
            ("no_invention_instruction", NO_INVENTION_INSTRUCTION),
        ],
    )
}

/// Reads `email_content` / `resume_advice` from the reply, substituting the
/// placeholder for each key that is missing or unusable. A reply that is not a
/// JSON object at all is kept as the email text.
fn parse_extended_reply(reply: &str) -> GeneratedOutput {
    let cleaned = strip_json_fences(reply);

    let object = match serde_json::from_str::<Value>(cleaned) {
        Ok(Value::Object(object)) => object,
        _ => {
            warn!("Generation reply is not a JSON object; using it as the email text");
            return GeneratedOutput::EmailWithAdvice {
                email_markdown: if cleaned.is_empty() {
                    EMAIL_PLACEHOLDER.to_string()
                } else {
                    cleaned.to_string()
                },
                resume_advice_markdown: ADVICE_PLACEHOLDER.to_string(),
            };
        }
    };

    let email = markdown_field(object.get("email_content"));
    let advice = markdown_field(object.get("resume_advice"));

    if email.is_none() {
        warn!("Generation reply has no usable email_content");
    }
    if advice.is_none() {
        warn!("Generation reply has no usable resume_advice");
    }

    GeneratedOutput::EmailWithAdvice {
        email_markdown: email.unwrap_or_else(|| EMAIL_PLACEHOLDER.to_string()),
        resume_advice_markdown: advice.unwrap_or_else(|| ADVICE_PLACEHOLDER.to_string()),
    }
}

/// A string is used as-is; an array of strings becomes a Markdown bullet list.
fn markdown_field(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(|item| format!("- {}", item.trim()))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => return None,
    };

    (!text.is_empty()).then_some(text)
}
