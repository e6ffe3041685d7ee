//! Axum route handlers for résumé upload and analysis.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::text_from_pdf;
use crate::state::AppState;

use super::{analyze_resume, insert_profile, ExtractedProfile};

#[derive(Debug, Serialize)]
pub struct UploadProfileResponse {
    pub profile_id: Uuid,
    pub filename: String,
    pub analysis: ExtractedProfile,
}

/// POST /api/v1/profiles
///
/// Accepts a multipart PDF upload, extracts its text, analyzes it into a
/// profile and persists the result. Analysis itself cannot fail; only an
/// unreadable document or a persistence error surfaces to the caller.
pub async fn handle_upload_profile(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadProfileResponse>, AppError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("resume.pdf").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
            upload = Some((filename, bytes.to_vec()));
        }
    }

    let (filename, bytes) = upload
        .ok_or_else(|| AppError::Validation("Multipart field 'file' is required".to_string()))?;

    if !filename.to_lowercase().ends_with(".pdf") {
        return Err(AppError::Validation(
            "Only PDF files are supported".to_string(),
        ));
    }

    let text = text_from_pdf(&bytes)?;
    let analysis = analyze_resume(&state.llm, &text).await;
    let row = insert_profile(&state.db, &filename, &text, &analysis).await?;

    info!(
        "Analyzed résumé '{}' into profile {} ({} skills, {} experience entries)",
        row.filename,
        row.id,
        row.skills.len(),
        row.experience.len()
    );

    Ok(Json(UploadProfileResponse {
        profile_id: row.id,
        filename: row.filename,
        analysis,
    }))
}
