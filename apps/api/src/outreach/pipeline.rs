//! Outreach pipeline — orchestrates one run from job URL to generated documents.
//!
//! Flow: fetch page → read resume → extract job details → generate → return.
//!
//! Strictly sequential and terminal on the first failure: a failed stage stops
//! the run and no later stage is called. Nothing is retried and nothing is
//! shared between runs; every value produced here lives for one run only.
//! A degraded (unstructured) job record is a success and flows into generation.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::llm_client::LanguageModel;
use crate::outreach::extractor::{ExtractionError, JobDetailExtractor};
use crate::outreach::generator::{ContentGenerator, GeneratedOutput, GenerationError, GenerationMode};
use crate::outreach::job_record::JobRecord;
use crate::sources::document_reader::{DocumentReadError, DocumentReader, ResumeSource};
use crate::sources::page_fetcher::{FetchError, PageFetcher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Fetch,
    ReadResume,
    Extract,
    Generate,
}

/// Terminal failure of a run, tagged by the stage that failed.
#[derive(Debug, Error)]
pub enum PipelineFailure {
    #[error("Fetch failed: {0}")]
    Fetch(FetchError),

    #[error("Resume read failed: {0}")]
    ResumeRead(DocumentReadError),

    #[error("Extraction failed: {0}")]
    Extraction(ExtractionError),

    #[error("Generation failed: {0}")]
    Generation(GenerationError),
}

impl PipelineFailure {
    pub fn stage(&self) -> PipelineStage {
        match self {
            PipelineFailure::Fetch(_) => PipelineStage::Fetch,
            PipelineFailure::ResumeRead(_) => PipelineStage::ReadResume,
            PipelineFailure::Extraction(_) => PipelineStage::Extract,
            PipelineFailure::Generation(_) => PipelineStage::Generate,
        }
    }

    /// Human-readable message shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            PipelineFailure::Fetch(e) => format!("Failed to fetch content from the job URL: {e}"),
            PipelineFailure::ResumeRead(e) => format!("Failed to read your resume: {e}"),
            PipelineFailure::Extraction(ExtractionError::EmptyInput) => {
                "Could not find a job description on the page.".to_string()
            }
            PipelineFailure::Extraction(e) => format!("Failed to extract job details: {e}"),
            PipelineFailure::Generation(e) => {
                format!("Failed to generate the email and resume advice: {e}")
            }
        }
    }
}

/// Successful result of a run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutcome {
    pub run_id: Uuid,
    pub job_record: JobRecord,
    pub output: GeneratedOutput,
}

#[derive(Clone)]
pub struct Pipeline {
    fetcher: Arc<dyn PageFetcher>,
    reader: Arc<dyn DocumentReader>,
    extractor: JobDetailExtractor,
    generator: ContentGenerator,
}

impl Pipeline {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        reader: Arc<dyn DocumentReader>,
        llm: Arc<dyn LanguageModel>,
    ) -> Self {
        Self {
            fetcher,
            reader,
            extractor: JobDetailExtractor::new(llm.clone()),
            generator: ContentGenerator::new(llm),
        }
    }

    pub fn extractor(&self) -> &JobDetailExtractor {
        &self.extractor
    }

    pub async fn run(
        &self,
        job_url: &str,
        resume: &ResumeSource,
        mode: GenerationMode,
    ) -> Result<PipelineOutcome, PipelineFailure> {
        let run_id = Uuid::new_v4();
        info!("Run {run_id}: starting for {job_url} (mode={mode:?})");

        let result = self.run_stages(run_id, job_url, resume, mode).await;
        if let Err(failure) = &result {
            error!(
                "Run {run_id}: terminated at {:?} stage: {failure}",
                failure.stage()
            );
        }
        result
    }

    async fn run_stages(
        &self,
        run_id: Uuid,
        job_url: &str,
        resume: &ResumeSource,
        mode: GenerationMode,
    ) -> Result<PipelineOutcome, PipelineFailure> {
        // Stage 1: fetch the job page
        let page_text = self
            .fetcher
            .fetch(job_url)
            .await
            .map_err(PipelineFailure::Fetch)?;
        if page_text.trim().is_empty() {
            return Err(PipelineFailure::Fetch(FetchError::Empty));
        }
        info!("Run {run_id}: fetched {} chars of page text", page_text.len());

        // Stage 2: read the resume
        let resume_text = self
            .reader
            .read(resume)
            .await
            .map_err(PipelineFailure::ResumeRead)?;
        if resume_text.trim().is_empty() {
            return Err(PipelineFailure::ResumeRead(DocumentReadError::NoText));
        }
        info!("Run {run_id}: read {} chars of resume text", resume_text.len());

        // Stage 3: structure the posting (degraded records pass through)
        let job_record = self
            .extractor
            .extract(&page_text)
            .await
            .map_err(PipelineFailure::Extraction)?;
        match job_record.details() {
            Some(details) => info!(
                "Run {run_id}: job record structured (position={:?}, company={:?})",
                details.position, details.company_name
            ),
            None => info!("Run {run_id}: job record degraded to raw text"),
        }

        // Stage 4: generate documents
        let output = self
            .generator
            .generate(&job_record, &resume_text, mode)
            .await
            .map_err(PipelineFailure::Generation)?;
        info!("Run {run_id}: completed");

        Ok(PipelineOutcome {
            run_id,
            job_record,
            output,
        })
    }
}
