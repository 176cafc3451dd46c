use super::api::{Content, GenerateContentRequest, GenerationConfig as GoogleGenerationConfig, Part};
use crate::{
    client_utils,
    normalize::{normalize_with, ResponseShape},
    CredentialSource, GenerationConfig, ProviderClient, ProviderError, ProviderResult,
    REQUEST_TIMEOUT,
};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Client,
};
use std::{collections::HashMap, time::Duration};

const PROVIDER: &str = "google";

/// Environment variable read when no credential source is configured.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const GEMINI_DEFAULT_MODEL: &str = "gemini-2.5-flash";

pub struct GeminiModel {
    model_id: String,
    credential: CredentialSource,
    base_url: String,
    client: Client,
    headers: HashMap<String, String>,
    timeout: Duration,
}

#[derive(Clone, Default)]
pub struct GeminiModelOptions {
    /// Defaults to the `GEMINI_API_KEY` environment variable.
    pub credential: Option<CredentialSource>,
    pub base_url: Option<String>,
    pub headers: Option<HashMap<String, String>>,
    pub client: Option<Client>,
    /// Bound on each call. Defaults to [`REQUEST_TIMEOUT`].
    pub timeout: Option<Duration>,
}

impl GeminiModel {
    #[must_use]
    pub fn new(model_id: impl Into<String>, options: GeminiModelOptions) -> Self {
        let GeminiModelOptions {
            credential,
            base_url,
            headers,
            client,
            timeout,
        } = options;

        let base_url = base_url
            .unwrap_or_else(|| "https://generativelanguage.googleapis.com/v1beta".to_string())
            .trim_end_matches('/')
            .to_string();
        let credential = credential.unwrap_or_else(|| CredentialSource::env(GEMINI_API_KEY_ENV));
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

        let key_header = HeaderValue::from_str(api_key).map_err(|error| {
            ProviderError::InvalidInput(format!("Invalid Gemini API key header value: {error}"))
        })?;
        headers.insert(HeaderName::from_static("x-goog-api-key"), key_header);

        for (key, value) in &self.headers {
            let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|error| {
                ProviderError::InvalidInput(format!("Invalid Gemini header name '{key}': {error}"))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|error| {
                ProviderError::InvalidInput(format!(
                    "Invalid Gemini header value for '{key}': {error}"
                ))
            })?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }
}

#[async_trait::async_trait]
impl ProviderClient for GeminiModel {
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
                let params = convert_to_generate_content_request(prompt, config);

                let url = format!("{}/models/{}:generateContent", self.base_url, self.model_id);

                tracing::debug!(model = %self.model_id, "sending Gemini generateContent request");
                let raw = client_utils::send_json(
                    &self.client,
                    &url,
                    &params,
                    headers,
                    self.timeout,
                    PROVIDER,
                )
                .await?;

                Ok(normalize_with(ResponseShape::Gemini, &raw))
            },
        )
        .await
    }
}

fn convert_to_generate_content_request(
    prompt: &str,
    config: &GenerationConfig,
) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: "user".to_string(),
            parts: vec![Part {
                text: prompt.to_string(),
            }],
        }],
        generation_config: GoogleGenerationConfig {
            temperature: config.temperature(),
            max_output_tokens: config.max_output_tokens(),
            top_p: config.top_p,
        },
    }
}
