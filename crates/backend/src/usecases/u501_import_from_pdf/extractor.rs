use async_trait::async_trait;
use contracts::domain::a001_product::MIB;
use contracts::usecases::u501_import_from_pdf::ImportedProduct;
use serde::Deserialize;
use std::time::Duration;

use super::error::ImportError;
use crate::shared::config::Config;

/// Загруженный администратором файл
#[derive(Debug, Clone)]
pub struct PdfUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl PdfUpload {
    /// Проверка расширения/типа и размера до обращения к сервису
    pub fn check(&self, max_bytes: u64) -> Result<(), ImportError> {
        let is_pdf_type = self.content_type.as_deref() == Some("application/pdf");
        let is_pdf_name = self.file_name.to_lowercase().ends_with(".pdf");
        if !is_pdf_type && !is_pdf_name {
            return Err(ImportError::InvalidFile(
                "Por favor selecciona un archivo PDF".to_string(),
            ));
        }
        if self.bytes.is_empty() {
            return Err(ImportError::InvalidFile("El archivo está vacío".to_string()));
        }
        if self.bytes.len() as u64 > max_bytes {
            return Err(ImportError::TooLarge {
                max_mb: max_bytes / MIB,
            });
        }
        Ok(())
    }
}

/// Внешний сервис, извлекающий товары из PDF
#[async_trait]
pub trait ProductExtractor: Send + Sync {
    async fn extract(&self, upload: PdfUpload) -> Result<Vec<ImportedProduct>, ImportError>;
}

/// Ответ сервиса: голый список или объект с полем `products`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ExtractorReply {
    List(Vec<ImportedProduct>),
    Wrapped {
        #[serde(default)]
        products: Vec<ImportedProduct>,
    },
}

impl ExtractorReply {
    fn into_products(self) -> Vec<ImportedProduct> {
        match self {
            ExtractorReply::List(products) | ExtractorReply::Wrapped { products } => products,
        }
    }
}

fn parse_reply(body: &str) -> Result<Vec<ImportedProduct>, ImportError> {
    let reply: ExtractorReply = serde_json::from_str(body)
        .map_err(|e| ImportError::Upstream(format!("respuesta inválida: {}", e)))?;
    Ok(reply.into_products())
}

/// HTTP-клиент сервиса извлечения (multipart POST с полем `file`)
pub struct HttpExtractor {
    client: reqwest::Client,
    url: String,
}

impl HttpExtractor {
    /// `None`, если в конфигурации не задан `extractor_url`
    pub fn from_config(config: &Config) -> Result<Option<Self>, ImportError> {
        let url = config.import.extractor_url.trim();
        if url.is_empty() {
            return Ok(None);
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.import.timeout_secs))
            .build()?;
        Ok(Some(Self {
            client,
            url: url.to_string(),
        }))
    }
}

#[async_trait]
impl ProductExtractor for HttpExtractor {
    async fn extract(&self, upload: PdfUpload) -> Result<Vec<ImportedProduct>, ImportError> {
        let part = reqwest::multipart::Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str("application/pdf")?;
        let form = reqwest::multipart::Form::new().part("file", part);

        tracing::info!("Sending PDF to extractor: {}", self.url);
        let response = self.client.post(&self.url).multipart(form).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::warn!("Extractor answered {}: {}", status, body);
            return Err(ImportError::Upstream(format!("HTTP {}", status.as_u16())));
        }
        parse_reply(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, content_type: Option<&str>, len: usize) -> PdfUpload {
        PdfUpload {
            file_name: name.to_string(),
            content_type: content_type.map(str::to_string),
            bytes: vec![b'%'; len],
        }
    }

    #[test]
    fn test_check_accepts_pdf_by_name_or_type() {
        assert!(upload("catalogo.PDF", None, 10).check(MIB).is_ok());
        assert!(upload("blob", Some("application/pdf"), 10).check(MIB).is_ok());
        assert!(matches!(
            upload("foto.png", Some("image/png"), 10).check(MIB),
            Err(ImportError::InvalidFile(_))
        ));
    }

    #[test]
    fn test_check_rejects_oversized_file() {
        let err = upload("big.pdf", None, (MIB + 1) as usize)
            .check(MIB)
            .unwrap_err();
        assert!(matches!(err, ImportError::TooLarge { max_mb: 1 }));
    }

    #[test]
    fn test_parse_reply_accepts_both_shapes() {
        let bare = r#"[{"titulo":"Halo 3","categoria":"juegos","subcategoria":"xboxOne"}]"#;
        assert_eq!(parse_reply(bare).unwrap().len(), 1);

        let wrapped = r#"{"success":true,"products":[{"titulo":"A"},{"titulo":"B"}]}"#;
        assert_eq!(parse_reply(wrapped).unwrap().len(), 2);

        assert!(matches!(parse_reply("<html>"), Err(ImportError::Upstream(_))));
    }

    #[test]
    fn test_missing_url_disables_extractor() {
        let config = Config::default();
        assert!(HttpExtractor::from_config(&config).unwrap().is_none());
    }
}
