use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::domain::common::CatalogError;
use serde_json::json;

use crate::usecases::u501_import_from_pdf::ImportError;

/// Ошибка обработчика: статус и тело `{error, fields?}`
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: serde_json::Value,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "error": message.into() }),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        match &e {
            CatalogError::NotFound { .. } => ApiError::new(StatusCode::NOT_FOUND, e.to_string()),
            CatalogError::Validation(errors) => ApiError {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                body: json!({ "error": errors.to_string(), "fields": errors }),
            },
            CatalogError::DuplicateId(_) => ApiError::new(StatusCode::CONFLICT, e.to_string()),
            CatalogError::RemoteFailure(_) => ApiError::new(StatusCode::BAD_GATEWAY, e.to_string()),
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(e: ImportError) -> Self {
        ApiError::new(e.status_code(), e.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        match e.downcast::<CatalogError>() {
            Ok(catalog) => catalog.into(),
            Err(e) => match e.downcast::<ImportError>() {
                Ok(import) => import.into(),
                Err(e) => {
                    tracing::error!("Request failed: {:#}", e);
                    ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::{FormField, ValidationErrors};

    #[test]
    fn test_catalog_errors_map_to_status() {
        let not_found: ApiError = anyhow::Error::new(CatalogError::product_not_found("7")).into();
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);

        let invalid: ApiError = anyhow::Error::new(CatalogError::from(ValidationErrors::single(
            FormField::Image,
            "Por favor agrega una imagen",
        )))
        .into();
        assert_eq!(invalid.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(invalid.body["fields"]["errors"][0]["field"], "image");

        let duplicate: ApiError = CatalogError::DuplicateId("1".into()).into();
        assert_eq!(duplicate.status, StatusCode::CONFLICT);
    }

    #[test]
    fn test_import_and_unknown_errors() {
        let timeout: ApiError = anyhow::Error::new(ImportError::Timeout).into();
        assert_eq!(timeout.status, StatusCode::GATEWAY_TIMEOUT);

        let other: ApiError = anyhow::anyhow!("disk full").into();
        assert_eq!(other.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(other.body["error"], "Internal server error");
    }
}
