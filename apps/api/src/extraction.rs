//! PDF → plain text for uploaded resumes.

use tracing::{debug, warn};

use crate::errors::AppError;

/// Minimum trimmed characters for an extraction to count as readable text.
pub const MIN_EXTRACTED_CHARS: usize = 50;
pub const PDF_EXTRACTION_FAILED: &str =
    "Failed to extract text from PDF. Please ensure the PDF contains readable text.";

/// Extracts text from PDF bytes on the blocking pool.
///
/// Image-only or unparseable PDFs fail with `ExtractionFailed`.
pub async fn extract_text_from_pdf(bytes: Vec<u8>) -> Result<String, AppError> {
    if bytes.is_empty() {
        return Err(AppError::ExtractionFailed(PDF_EXTRACTION_FAILED.to_string()));
    }

    let size = bytes.len();
    let extracted = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| {
            // pdf-extract panics on some malformed inputs; the join error carries it.
            warn!("PDF extraction task aborted: {e}");
            AppError::ExtractionFailed(PDF_EXTRACTION_FAILED.to_string())
        })?
        .map_err(|e| {
            AppError::ExtractionFailed(format!("{PDF_EXTRACTION_FAILED} Error: {e}"))
        })?;

    debug!(bytes = size, chars = extracted.len(), "Extracted text from PDF");
    ensure_readable(&extracted)
}

/// Trims extracted text and rejects it when too short to be a resume.
pub fn ensure_readable(text: &str) -> Result<String, AppError> {
    let text = text.trim();
    let chars = text.chars().count();
    if chars < MIN_EXTRACTED_CHARS {
        return Err(AppError::ExtractionFailed(format!(
            "PDF extraction resulted in {chars} characters. {PDF_EXTRACTION_FAILED}"
        )));
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_bytes_rejected() {
        let err = extract_text_from_pdf(Vec::new()).await.unwrap_err();
        assert!(matches!(err, AppError::ExtractionFailed(_)));
    }

    #[tokio::test]
    async fn test_non_pdf_bytes_rejected() {
        let err = extract_text_from_pdf(b"definitely not a pdf".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ExtractionFailed(_)));
    }

    #[test]
    fn test_short_text_rejected_with_count() {
        match ensure_readable("   Jane Doe\n  ") {
            Err(AppError::ExtractionFailed(msg)) => {
                assert!(msg.starts_with("PDF extraction resulted in 8 characters."))
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_readable_text_is_trimmed() {
        let body = "x".repeat(MIN_EXTRACTED_CHARS);
        assert_eq!(ensure_readable(&format!("\n\n{body}  ")).unwrap(), body);
    }
}
