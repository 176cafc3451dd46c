use super::chat_api::{ChatCompletionRequestMessage, CreateChatCompletionRequest};
use crate::{
    client_utils,
    normalize::{normalize_with, ResponseShape},
    CredentialSource, GenerationConfig, ProviderClient, ProviderError, ProviderResult,
    REQUEST_TIMEOUT,
};
use reqwest::{
    header::{self, HeaderMap, HeaderName, HeaderValue},
    Client,
};
use std::{collections::HashMap, time::Duration};

const PROVIDER: &str = "openai";

/// Environment variable read when no credential source is configured.
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4o-mini";

pub struct OpenAIChatModel {
    model_id: String,
    credential: CredentialSource,
    base_url: String,
    client: Client,
    headers: HashMap<String, String>,
    timeout: Duration,
}

#[derive(Clone, Default)]
pub struct OpenAIChatModelOptions {
    pub base_url: Option<String>,
    /// Defaults to the `OPENAI_API_KEY` environment variable.
    pub credential: Option<CredentialSource>,
    pub headers: Option<HashMap<String, String>>,
    pub client: Option<Client>,
    /// Bound on each call. Defaults to [`REQUEST_TIMEOUT`].
    pub timeout: Option<Duration>,
}

impl OpenAIChatModel {
    #[must_use]
    pub fn new(model_id: impl Into<String>, options: OpenAIChatModelOptions) -> Self {
        let OpenAIChatModelOptions {
            base_url,
            credential,
            headers,
            client,
            timeout,
        } = options;

        let base_url = base_url
            .unwrap_or_else(|| "https://api.openai.com/v1".to_string())
            .trim_end_matches('/')
            .to_string();
        let credential = credential.unwrap_or_else(|| CredentialSource::env(OPENAI_API_KEY_ENV));
        let client = client.unwrap_or_else(Client::new);
        let headers = headers.unwrap_or_default();

        Self {
            model_id: model_id.into(),
            credential,
            base_url,
            client,
            headers,
            timeout: timeout.unwrap_or(REQUEST_TIMEOUT),
        }
    }

    fn request_headers(&self, api_key: &str) -> ProviderResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        let auth_header = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|error| {
            ProviderError::InvalidInput(format!("Invalid OpenAI API key header value: {error}"))
        })?;
        headers.insert(header::AUTHORIZATION, auth_header);

        for (key, value) in &self.headers {
            let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|error| {
                ProviderError::InvalidInput(format!("Invalid OpenAI header name '{key}': {error}"))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|error| {
                ProviderError::InvalidInput(format!(
                    "Invalid OpenAI header value for '{key}': {error}"
                ))
            })?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }
}

#[async_trait::async_trait]
impl ProviderClient for OpenAIChatModel {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    fn model_id(&self) -> String {
        self.model_id.clone()
    }

    async fn generate(&self, prompt: &str, config: &GenerationConfig) -> ProviderResult<String> {
        crate::opentelemetry::trace_generate(
            self.provider(),
            &self.model_id,
            prompt,
            config,
            || async move {
                let api_key = self.credential.resolve()?;
                let headers = self.request_headers(&api_key)?;
                let params = convert_to_chat_completion_request(&self.model_id, prompt, config);

                let url = format!("{}/chat/completions", self.base_url);

                tracing::debug!(model = %self.model_id, "sending OpenAI chat completion request");
                let raw = client_utils::send_json(
                    &self.client,
                    &url,
                    &params,
                    headers,
                    self.timeout,
                    PROVIDER,
                )
                .await?;

                Ok(normalize_with(ResponseShape::OpenAIChat, &raw))
            },
        )
        .await
    }
}

fn convert_to_chat_completion_request(
    model_id: &str,
    prompt: &str,
    config: &GenerationConfig,
) -> CreateChatCompletionRequest {
    CreateChatCompletionRequest {
        model: model_id.to_string(),
        messages: vec![ChatCompletionRequestMessage {
            role: "user".to_string(),
            content: prompt.to_string(),
        }],
        max_tokens: config.max_output_tokens(),
        temperature: config.temperature(),
        top_p: config.top_p,
    }
}
