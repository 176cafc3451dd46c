use crate::{
    google::{GeminiModel, GeminiModelOptions, GEMINI_DEFAULT_MODEL},
    openai::{OpenAIChatModel, OpenAIChatModelOptions, OPENAI_DEFAULT_MODEL},
    CredentialSource, ProviderClient, ProviderError,
};
use std::{fmt, str::FromStr, sync::Arc};

/// The wire protocol a provider speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    Gemini,
    OpenAI,
}

impl ProviderKind {
    #[must_use]
    pub fn default_model(self) -> &'static str {
        match self {
            Self::Gemini => GEMINI_DEFAULT_MODEL,
            Self::OpenAI => OPENAI_DEFAULT_MODEL,
        }
    }

    #[must_use]
    pub fn api_key_env(self) -> &'static str {
        match self {
            Self::Gemini => crate::google::GEMINI_API_KEY_ENV,
            Self::OpenAI => crate::openai::OPENAI_API_KEY_ENV,
        }
    }
}

impl FromStr for ProviderKind {
    type Err = ProviderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(Self::Gemini),
            "openai" => Ok(Self::OpenAI),
            other => Err(ProviderError::InvalidInput(format!(
                "Unknown provider '{other}', expected 'gemini' or 'openai'"
            ))),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Gemini => "gemini",
            Self::OpenAI => "openai",
        })
    }
}

/// Selects and configures a provider client.
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    /// Defaults to [`ProviderKind::default_model`].
    pub model_id: Option<String>,
    pub base_url: Option<String>,
    /// Defaults to the provider's API key environment variable.
    pub credential: Option<CredentialSource>,
}

impl ProviderConfig {
    #[must_use]
    pub fn credential(&self) -> CredentialSource {
        self.credential
            .clone()
            .unwrap_or_else(|| CredentialSource::env(self.kind.api_key_env()))
    }

    #[must_use]
    pub fn model_id(&self) -> String {
        self.model_id
            .clone()
            .unwrap_or_else(|| self.kind.default_model().to_string())
    }

    /// Build the client for this configuration.
    #[must_use]
    pub fn build(&self) -> Arc<dyn ProviderClient> {
        let credential = Some(self.credential());
        match self.kind {
            ProviderKind::Gemini => Arc::new(GeminiModel::new(
                self.model_id(),
                GeminiModelOptions {
                    credential,
                    base_url: self.base_url.clone(),
                    ..Default::default()
                },
            )),
            ProviderKind::OpenAI => Arc::new(OpenAIChatModel::new(
                self.model_id(),
                OpenAIChatModelOptions {
                    credential,
                    base_url: self.base_url.clone(),
                    ..Default::default()
                },
            )),
        }
    }
}
