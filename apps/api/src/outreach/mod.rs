// Outreach engine: job extraction, email + resume advice generation, and the
// pipeline that strings them together behind the HTTP handlers.
// All LLM calls go through llm_client — no direct provider calls here.

pub mod extractor;
pub mod generator;
pub mod handlers;
pub mod job_record;
pub mod pipeline;
pub mod presenter;
pub mod prompts;
