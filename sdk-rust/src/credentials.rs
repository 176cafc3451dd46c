use crate::{ProviderError, ProviderResult};
use std::{env, fmt};

/// Where a provider API key comes from. Resolved on every call so a key
/// exported or entered after startup is picked up.
#[derive(Clone)]
pub enum CredentialSource {
    /// Read from the named environment variable.
    Env(String),
    /// A secret supplied at runtime (e.g. typed in by the user).
    Static(String),
}

impl CredentialSource {
    pub fn env(name: impl Into<String>) -> Self {
        Self::Env(name.into())
    }

    pub fn secret(value: impl Into<String>) -> Self {
        Self::Static(value.into())
    }

    /// Returns the key, or `None` when it is unset or blank.
    #[must_use]
    pub fn lookup(&self) -> Option<String> {
        let value = match self {
            Self::Env(name) => env::var(name).ok()?,
            Self::Static(value) => value.clone(),
        };
        let value = value.trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }

    pub fn resolve(&self) -> ProviderResult<String> {
        self.lookup().ok_or_else(|| {
            ProviderError::Auth(match self {
                Self::Env(name) => {
                    format!("missing credential: environment variable {name} is not set")
                }
                Self::Static(_) => "missing credential: the supplied API key is empty".to_string(),
            })
        })
    }
}

impl fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Env(name) => f.debug_tuple("Env").field(name).finish(),
            Self::Static(_) => f.debug_tuple("Static").field(&"<redacted>").finish(),
        }
    }
}
