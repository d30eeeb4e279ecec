// PDF text extraction via pdf-extract. Page text is concatenated in order.

use std::panic::{self, AssertUnwindSafe};

use crate::error::ExtractionError;

/// Extract the text of every page.
pub fn extract(bytes: &[u8]) -> Result<String, ExtractionError> {
    // pdf-extract panics on some malformed files instead of returning Err.
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes)));

    match outcome {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ExtractionError::Malformed(format!("unreadable PDF: {e}"))),
        Err(_) => Err(ExtractionError::Malformed(
            "PDF parser aborted on this file".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_is_rejected() {
        assert!(extract(b"definitely not a pdf").is_err());
    }
}
