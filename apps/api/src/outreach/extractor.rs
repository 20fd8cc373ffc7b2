//! Job detail extraction — turns raw page text into a `JobRecord` with one model call.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::llm_client::prompts::{build_prompt, JSON_ONLY_SYSTEM};
use crate::llm_client::{strip_json_fences, CompletionOptions, LanguageModel, LlmError};
use crate::outreach::job_record::JobRecord;
use crate::outreach::prompts::{EXTRACTION_TEMPERATURE, JOB_EXTRACTION_PROMPT_TEMPLATE};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("No usable job posting text to extract from")]
    EmptyInput,

    #[error("Job extraction model call failed: {0}")]
    Model(#[from] LlmError),
}

/// Extracts structured job details from scraped posting text.
///
/// A reply that is not valid structured JSON is NOT an error: it degrades to
/// `JobRecord::Unstructured` so generation can still work from the raw text.
/// Only transport / API failures are reported as `ExtractionError`.
#[derive(Clone)]
pub struct JobDetailExtractor {
    llm: Arc<dyn LanguageModel>,
}

impl JobDetailExtractor {
    pub fn new(llm: Arc<dyn LanguageModel>) -> Self {
        Self { llm }
    }

    pub async fn extract(&self, raw_page_text: &str) -> Result<JobRecord, ExtractionError> {
        let raw_page_text = raw_page_text.trim();
        if raw_page_text.is_empty() {
            return Err(ExtractionError::EmptyInput);
        }

        let prompt = build_extraction_prompt(raw_page_text);
        let options = CompletionOptions::new(EXTRACTION_TEMPERATURE).with_system(JSON_ONLY_SYSTEM);

        let reply = self.llm.complete(&prompt, options).await?;
        let record = JobRecord::from_model_reply(strip_json_fences(&reply));

        match &record {
            JobRecord::Structured(details) => info!(
                "Job extracted: position={:?} company={:?} tech_stack={}",
                details.position,
                details.company_name,
                details.tech_stack.len()
            ),
            JobRecord::Unstructured { raw_response } => warn!(
                "Extraction reply is not valid job JSON; keeping {} chars of raw text",
                raw_response.len()
            ),
        }

        Ok(record)
    }
}

pub fn build_extraction_prompt(raw_page_text: &str) -> String {
    build_prompt(JOB_EXTRACTION_PROMPT_TEMPLATE, &[("raw_text", raw_page_text)])
}
