use axum::extract::Multipart;
use axum::Json;
use contracts::usecases::u501_import_from_pdf::{
    PdfImportResponse, SaveImportRequest, SaveImportResponse,
};

use super::error::ApiError;
use crate::shared::config::config_ref;
use crate::usecases::u501_import_from_pdf::{executor, HttpExtractor, ImportError, PdfUpload};

// ============================================================================
// UseCase u501: Import from PDF
// ============================================================================

/// Первое поле `file` из multipart-тела
async fn read_pdf_field(mut multipart: Multipart) -> Result<PdfUpload, ImportError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ImportError::InvalidFile(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("catalogo.pdf").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ImportError::InvalidFile(e.to_string()))?;
        return Ok(PdfUpload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }
    Err(ImportError::InvalidFile(
        "No se recibió ningún archivo".to_string(),
    ))
}

/// POST /api/u501/import/pdf
pub async fn u501_import_pdf(multipart: Multipart) -> Result<Json<PdfImportResponse>, ApiError> {
    let config = config_ref();
    let extractor = HttpExtractor::from_config(config)?.ok_or(ImportError::NotConfigured)?;
    let upload = read_pdf_field(multipart).await?;
    let response = executor::extract(&extractor, upload, config.uploads.max_pdf_bytes).await?;
    Ok(Json(response))
}

/// POST /api/u501/import/save
pub async fn u501_save(
    Json(request): Json<SaveImportRequest>,
) -> Result<Json<SaveImportResponse>, ApiError> {
    Ok(Json(executor::save(request.products).await?))
}
