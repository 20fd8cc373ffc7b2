use std::path::PathBuf;

use crate::outreach::pipeline::Pipeline;
use crate::outreach::presenter::Presenter;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Holds only immutable collaborators; every request builds its own run state.
#[derive(Clone)]
pub struct AppState {
    /// Pipeline wired with the page fetcher, document reader and language model.
    pub pipeline: Pipeline,
    pub presenter: Presenter,
    /// Resume used when a request does not upload one.
    pub default_resume: PathBuf,
}
