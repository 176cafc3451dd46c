use thiserror::Error;

/// Failure to turn an uploaded file into text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IngestError {
    /// A PDF was supplied but this build has no PDF parser.
    #[error("PDF text extraction is unavailable: rebuild with the `pdf` feature to enable PDF uploads")]
    ExtractionUnavailable,
    /// The file is not a well-formed document of its declared type.
    #[error("Failed to parse {file}: {message}")]
    Parse { file: String, message: String },
    #[error("Unsupported file type for {0}: expected .txt, .md or .pdf")]
    UnsupportedExtension(String),
}

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Provider error: {0}")]
    Provider(#[from] study_sdk::ProviderError),
    #[error("Ingestion error: {0}")]
    Ingest(#[from] IngestError),
}

/// An option value that did not match any known variant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid {kind} '{value}', expected one of: {expected}")]
pub struct ParseOptionError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}
