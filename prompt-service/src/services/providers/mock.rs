//! Mock provider implementation for testing.

use super::{GenerationRequest, ProviderError, TextProvider};
use crate::models::GenerationResult;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Mock text provider returning a canned envelope.
///
/// Records the number of calls and the last request so tests can assert
/// both that the provider was (or was not) reached and what was sent.
pub struct MockTextProvider {
    canned: GenerationResult,
    fail_with: Option<String>,
    calls: AtomicUsize,
    last_request: Mutex<Option<GenerationRequest>>,
}

impl MockTextProvider {
    pub fn new(canned: GenerationResult) -> Self {
        Self {
            canned,
            fail_with: None,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Build from a raw JSON envelope.
    pub fn from_json(value: serde_json::Value) -> Self {
        Self::new(serde_json::from_value(value).expect("mock envelope should deserialize"))
    }

    /// A provider that fails every call with the given API error message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            canned: GenerationResult::default(),
            fail_with: Some(message.into()),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.last_request
            .lock()
            .expect("mock request lock poisoned")
            .clone()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResult, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self
            .last_request
            .lock()
            .expect("mock request lock poisoned") = Some(request);

        if let Some(message) = &self.fail_with {
            return Err(ProviderError::ApiError(message.clone()));
        }

        Ok(self.canned.clone())
    }
}
