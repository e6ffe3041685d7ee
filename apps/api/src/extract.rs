use crate::errors::AppError;

/// Extracts plain text from an uploaded PDF.
///
/// The document layer is deliberately thin: anything pdf-extract cannot read
/// surfaces as `UnreadableDocument` and fails the upload operation.
pub fn text_from_pdf(bytes: &[u8]) -> Result<String, AppError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::UnreadableDocument(e.to_string()))
}
