// Text extraction: turns uploaded bytes into plain text per file format.
//
// The format comes from the filename extension (text after the last '.',
// case-insensitive). PDF and DOCX parsing need the `documents` feature;
// without it those files are reported as unsupported.

pub mod plain;
pub mod traits;

#[cfg(feature = "documents")]
pub mod docx;
#[cfg(feature = "documents")]
pub mod pdf;

use std::fmt;

use crate::error::ExtractionError;
use traits::TextExtractor;

/// Formats the extractor recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    /// Legacy Word; parsed as DOCX on a best-effort basis
    Doc,
    Txt,
}

impl DocumentFormat {
    /// Detect the format from a filename's extension.
    ///
    /// A name without a '.' is treated as having the whole name as its
    /// extension, which is never a supported one.
    pub fn from_filename(filename: &str) -> Result<Self, ExtractionError> {
        let ext = extension(filename);
        match ext.as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            "doc" => Ok(DocumentFormat::Doc),
            "txt" => Ok(DocumentFormat::Txt),
            _ => Err(ExtractionError::UnsupportedFormat(ext)),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DocumentFormat::Pdf => "PDF",
            DocumentFormat::Docx => "DOCX",
            DocumentFormat::Doc => "DOC",
            DocumentFormat::Txt => "TXT",
        };
        f.write_str(label)
    }
}

/// Lowercased text after the last '.' of a filename.
pub fn extension(filename: &str) -> String {
    filename
        .rsplit('.')
        .next()
        .unwrap_or(filename)
        .to_lowercase()
}

/// Extractor used by the server and CLI: dispatches on the file extension
/// and trims the result.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultExtractor;

impl TextExtractor for DefaultExtractor {
    fn extract(&self, filename: &str, bytes: &[u8]) -> Result<String, ExtractionError> {
        let format = DocumentFormat::from_filename(filename)?;

        let raw = match format {
            DocumentFormat::Txt => plain::decode(bytes),
            #[cfg(feature = "documents")]
            DocumentFormat::Docx | DocumentFormat::Doc => docx::extract(bytes)?,
            #[cfg(feature = "documents")]
            DocumentFormat::Pdf => pdf::extract(bytes)?,
            #[cfg(not(feature = "documents"))]
            other => {
                return Err(ExtractionError::UnsupportedFormat(
                    other.to_string().to_lowercase(),
                ))
            }
        };

        let text = raw.trim();
        if text.is_empty() {
            return Err(ExtractionError::Empty);
        }
        Ok(text.to_string())
    }
}
