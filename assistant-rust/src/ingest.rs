use crate::IngestError;
use std::path::Path;

/// Kinds of study material accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Text,
    Markdown,
    Pdf,
}

impl FileKind {
    /// Picks the kind from the file name's extension, case-insensitively.
    pub fn from_file_name(name: &str) -> Result<Self, IngestError> {
        let extension = Path::new(name)
            .extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("txt") => Ok(Self::Text),
            Some("md") => Ok(Self::Markdown),
            Some("pdf") => Ok(Self::Pdf),
            _ => Err(IngestError::UnsupportedExtension(name.to_string())),
        }
    }
}

/// A named byte blob as received from the upload surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn kind(&self) -> Result<FileKind, IngestError> {
        FileKind::from_file_name(&self.name)
    }
}

/// Extracts plain text from an uploaded file.
///
/// Text and Markdown are decoded as UTF-8, substituting U+FFFD for invalid
/// sequences. PDFs are read page by page; pages whose text cannot be extracted
/// or is blank are skipped and the rest are joined with newlines in page order.
pub fn extract_text(file: &UploadedFile) -> Result<String, IngestError> {
    match file.kind()? {
        FileKind::Text | FileKind::Markdown => Ok(decode_text(&file.bytes)),
        FileKind::Pdf => extract_pdf_text(&file.name, &file.bytes),
    }
}

fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(error) => {
            tracing::debug!(%error, "upload is not valid UTF-8, decoding lossily");
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

#[cfg(feature = "pdf")]
fn extract_pdf_text(name: &str, bytes: &[u8]) -> Result<String, IngestError> {
    let document = lopdf::Document::load_mem(bytes).map_err(|error| IngestError::Parse {
        file: name.to_string(),
        message: error.to_string(),
    })?;

    let pages = document
        .get_pages()
        .into_keys()
        .map(|page_number| (page_number, document.extract_text(&[page_number])));

    Ok(join_page_texts(name, pages))
}

/// Joins page texts in the given order with single newlines. Pages whose
/// extraction failed or produced only whitespace are dropped; lopdf returns
/// blank text for a page with a missing or corrupt content stream.
#[cfg_attr(not(feature = "pdf"), allow(dead_code))]
fn join_page_texts<E: std::fmt::Display>(
    name: &str,
    pages: impl IntoIterator<Item = (u32, Result<String, E>)>,
) -> String {
    pages
        .into_iter()
        .filter_map(|(page_number, text)| match text {
            Ok(text) if !text.trim().is_empty() => Some(text.trim_end().to_string()),
            Ok(_) => {
                tracing::debug!(file = name, page_number, "skipping PDF page with no text");
                None
            }
            Err(error) => {
                tracing::debug!(file = name, page_number, %error, "skipping unreadable PDF page");
                None
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(not(feature = "pdf"))]
fn extract_pdf_text(_name: &str, _bytes: &[u8]) -> Result<String, IngestError> {
    Err(IngestError::ExtractionUnavailable)
}
