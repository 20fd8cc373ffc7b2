//! Test doubles shared by unit tests across modules.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm_client::{CompletionOptions, LanguageModel, LlmError};
use crate::sources::document_reader::{DocumentReadError, DocumentReader, ResumeSource};
use crate::sources::page_fetcher::{FetchError, PageFetcher};

/// A recorded `LanguageModel::complete` invocation.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt: String,
    pub options: CompletionOptions,
}

/// A language model that replays scripted replies in order and records every call.
/// Running out of replies is reported as an API error.
#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replying(replies: &[&str]) -> Self {
        let model = Self::new();
        for reply in replies {
            model.push_reply(reply);
        }
        model
    }

    pub fn failing(status: u16, message: &str) -> Self {
        let model = Self::new();
        model.push_error(LlmError::Api {
            status,
            message: message.to_string(),
        });
        model
    }

    pub fn push_reply(&self, reply: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(reply.to_string()));
    }

    pub fn push_error(&self, error: LlmError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(&self, prompt: &str, options: CompletionOptions) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            prompt: prompt.to_string(),
            options,
        });

        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(LlmError::Api {
                    status: 500,
                    message: "scripted model has no reply left".to_string(),
                })
            })
    }
}

/// A page fetcher that returns fixed text, or fails with `FetchError::Status`.
pub struct StaticFetcher {
    page: Result<String, u16>,
    calls: AtomicUsize,
}

impl StaticFetcher {
    pub fn page(text: &str) -> Self {
        Self {
            page: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            page: Err(status),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.page.clone().map_err(FetchError::Status)
    }
}

/// A document reader that returns fixed text, or fails as if the file were missing.
pub struct StaticReader {
    text: Option<String>,
    calls: AtomicUsize,
}

impl StaticReader {
    pub fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn missing() -> Self {
        Self {
            text: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentReader for StaticReader {
    async fn read(&self, source: &ResumeSource) -> Result<String, DocumentReadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.text.clone().ok_or_else(|| DocumentReadError::Io {
            path: source.display_name().into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        })
    }
}
