mod client_utils;
mod credentials;
mod errors;
pub mod google;
pub mod normalize;
pub mod openai;
mod opentelemetry;
mod provider;
mod registry;
pub mod study_sdk_test;
mod types;

pub use client_utils::REQUEST_TIMEOUT;
pub use credentials::CredentialSource;
pub use errors::*;
pub use normalize::{normalize, normalize_with, ResponseShape, TRUNCATION_WARNING};
pub use provider::ProviderClient;
pub use registry::{ProviderConfig, ProviderKind};
pub use types::*;
