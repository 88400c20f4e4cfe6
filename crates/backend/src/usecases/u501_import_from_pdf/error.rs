use axum::http::StatusCode;
use thiserror::Error;

/// Ошибки импорта из PDF
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("El servicio de importación no está configurado")]
    NotConfigured,

    #[error("Archivo inválido: {0}")]
    InvalidFile(String),

    #[error("El archivo es demasiado grande. Máximo {max_mb} MB")]
    TooLarge { max_mb: u64 },

    #[error("No se encontraron productos en el PDF")]
    NoProducts,

    #[error("Error del servicio de extracción: {0}")]
    Upstream(String),

    #[error("El servicio de extracción no respondió a tiempo")]
    Timeout,
}

impl ImportError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ImportError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            ImportError::InvalidFile(_) | ImportError::TooLarge { .. } | ImportError::NoProducts => {
                StatusCode::BAD_REQUEST
            }
            ImportError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ImportError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl From<reqwest::Error> for ImportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ImportError::Timeout
        } else {
            ImportError::Upstream(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ImportError::NotConfigured.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(ImportError::TooLarge { max_mb: 10 }.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ImportError::NoProducts.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ImportError::Upstream("500".into()).status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(ImportError::Timeout.status_code(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn test_too_large_message_names_limit() {
        assert_eq!(
            ImportError::TooLarge { max_mb: 10 }.to_string(),
            "El archivo es demasiado grande. Máximo 10 MB"
        );
    }
}
