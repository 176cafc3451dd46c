use crate::{GenerationConfig, ProviderResult};

/// A hosted language model that turns one prompt into display text.
///
/// Implementations issue a single request per call: no retries, no streaming.
/// They hold no per-session state, so one client can serve many sessions.
#[async_trait::async_trait]
pub trait ProviderClient: Send + Sync {
    fn provider(&self) -> &'static str;
    fn model_id(&self) -> String;
    /// Sends `prompt` as a single user turn and returns the normalized
    /// response text.
    async fn generate(&self, prompt: &str, config: &GenerationConfig) -> ProviderResult<String>;
}
