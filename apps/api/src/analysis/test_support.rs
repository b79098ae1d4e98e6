//! Test doubles for the model and fetcher seams.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::fetcher::{ContentFetcher, FetchError, FetchedPage};
use crate::llm_client::{LlmError, TextModel};

/// Returns one canned completion (or error) and records every prompt it sees.
pub struct ScriptedModel {
    reply: Option<String>,
    failure: Mutex<Option<LlmError>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            failure: Mutex::new(None),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Fails the first call with `error`; later calls see an empty completion.
    pub fn failing(error: LlmError) -> Self {
        Self {
            reply: None,
            failure: Mutex::new(Some(error)),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextModel for ScriptedModel {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if let Some(error) = self.failure.lock().unwrap().take() {
            return Err(error);
        }
        self.reply.clone().ok_or(LlmError::EmptyContent)
    }
}

/// Serves pages from a fixed map; unknown URLs fail with 404.
#[derive(Default)]
pub struct StaticFetcher {
    pages: HashMap<String, FetchedPage>,
    requested: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn with_page(mut self, url: &str, title: &str, text: &str) -> Self {
        self.pages.insert(
            url.to_string(),
            FetchedPage {
                title: title.to_string(),
                text: text.to_string(),
            },
        );
        self
    }

    pub fn calls(&self) -> usize {
        self.requested.lock().unwrap().len()
    }

    /// Every URL passed to `fetch`, in call order.
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        self.requested.lock().unwrap().push(url.to_string());
        self.pages.get(url).cloned().ok_or(FetchError::Status(404))
    }
}
