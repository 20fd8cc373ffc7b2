// Input collaborators for the outreach pipeline: the job page and the resume.
// Both sit behind traits so the pipeline can be exercised with in-memory fakes.

pub mod cookies;
pub mod document_reader;
pub mod page_fetcher;
