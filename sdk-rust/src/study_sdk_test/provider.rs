use std::{collections::VecDeque, sync::Mutex};

use crate::{GenerationConfig, ProviderClient, ProviderError, ProviderResult};

/// Result for a mocked `generate` call.
/// It can either be response text or an error to return.
pub enum MockGenerateResult {
    Text(String),
    Error(ProviderError),
}

impl MockGenerateResult {
    /// Construct a result that yields the provided text.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Construct a result that yields the provided error.
    pub fn error(error: ProviderError) -> Self {
        Self::Error(error)
    }
}

impl From<&str> for MockGenerateResult {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for MockGenerateResult {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<ProviderError> for MockGenerateResult {
    fn from(error: ProviderError) -> Self {
        Self::Error(error)
    }
}

/// A prompt and config captured by [`MockProvider`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedGenerateCall {
    pub prompt: String,
    pub config: GenerationConfig,
}

#[derive(Default)]
struct MockProviderState {
    mocked_generate_results: VecDeque<MockGenerateResult>,
    tracked_generate_calls: Vec<TrackedGenerateCall>,
}

/// A mock provider for testing that tracks prompts and yields predefined
/// outputs.
pub struct MockProvider {
    provider: &'static str,
    model_id: String,
    state: Mutex<MockProviderState>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self {
            provider: "mock",
            model_id: "mock-model".to_string(),
            state: Mutex::new(MockProviderState::default()),
        }
    }
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a single mocked generate result.
    pub fn enqueue_generate<R>(&self, result: R) -> &Self
    where
        R: Into<MockGenerateResult>,
    {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.mocked_generate_results.push_back(result.into());
        drop(state);
        self
    }

    /// Retrieve the calls tracked so far, in call order.
    pub fn tracked_generate_calls(&self) -> Vec<TrackedGenerateCall> {
        let state = self.state.lock().expect("mock state poisoned");
        state.tracked_generate_calls.clone()
    }

    /// Prompts only, in call order.
    pub fn tracked_prompts(&self) -> Vec<String> {
        self.tracked_generate_calls()
            .into_iter()
            .map(|call| call.prompt)
            .collect()
    }
}

#[async_trait::async_trait]
impl ProviderClient for MockProvider {
    fn provider(&self) -> &'static str {
        self.provider
    }

    fn model_id(&self) -> String {
        self.model_id.clone()
    }

    async fn generate(&self, prompt: &str, config: &GenerationConfig) -> ProviderResult<String> {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.tracked_generate_calls.push(TrackedGenerateCall {
            prompt: prompt.to_string(),
            config: *config,
        });

        let result = state.mocked_generate_results.pop_front().ok_or_else(|| {
            ProviderError::Invariant(self.provider, "no mocked generate results available".into())
        })?;

        match result {
            MockGenerateResult::Text(text) => Ok(text),
            MockGenerateResult::Error(error) => Err(error),
        }
    }
}
