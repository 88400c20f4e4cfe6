use contracts::usecases::u501_import_from_pdf::{
    ImportedProduct, PdfImportResponse, SaveImportResponse,
};

use super::error::ImportError;
use super::extractor::{PdfUpload, ProductExtractor};
use crate::domain::a001_product;

/// Отправить PDF в сервис извлечения и вернуть записи для предпросмотра
pub async fn extract(
    extractor: &dyn ProductExtractor,
    upload: PdfUpload,
    max_bytes: u64,
) -> Result<PdfImportResponse, ImportError> {
    upload.check(max_bytes)?;
    let file_name = upload.file_name.clone();
    let products: Vec<ImportedProduct> = extractor
        .extract(upload)
        .await?
        .into_iter()
        .filter(ImportedProduct::has_title)
        .map(ImportedProduct::with_defaults)
        .filter(|record| match record.placement() {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("Dropping extracted record '{}': {}", record.titulo, e);
                false
            }
        })
        .collect();
    if products.is_empty() {
        return Err(ImportError::NoProducts);
    }
    tracing::info!("Extracted {} products from {}", products.len(), file_name);
    Ok(PdfImportResponse::extracted(products))
}

/// Сохранить подтверждённые записи; записи без названия
/// или с неизвестным местом в каталоге пропускаются
pub async fn save(records: Vec<ImportedProduct>) -> anyhow::Result<SaveImportResponse> {
    let total = records.len();
    let mut saved = 0usize;
    for record in records {
        let titulo = record.titulo.clone();
        match record.into_new_product() {
            Ok(product) => {
                a001_product::service::insert_new(product).await?;
                saved += 1;
            }
            Err(e) => tracing::warn!("Skipping imported record '{}': {}", titulo, e),
        }
    }
    tracing::info!("Import saved {} of {} records", saved, total);
    Ok(SaveImportResponse::saved(saved))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use contracts::domain::a001_product::MIB;

    struct FixedExtractor(Vec<ImportedProduct>);

    #[async_trait]
    impl ProductExtractor for FixedExtractor {
        async fn extract(&self, _upload: PdfUpload) -> Result<Vec<ImportedProduct>, ImportError> {
            Ok(self.0.clone())
        }
    }

    fn pdf() -> PdfUpload {
        PdfUpload {
            file_name: "catalogo.pdf".into(),
            content_type: Some("application/pdf".into()),
            bytes: b"%PDF-1.4".to_vec(),
        }
    }

    #[tokio::test]
    async fn test_extract_drops_untitled_and_fills_defaults() {
        let extractor = FixedExtractor(vec![
            ImportedProduct {
                titulo: "Halo 3".into(),
                categoria: "juegos".into(),
                subcategoria: Some("xboxOne".into()),
                ..Default::default()
            },
            ImportedProduct::default(),
        ]);
        let response = extract(&extractor, pdf(), MIB).await.unwrap();
        assert!(response.success);
        assert_eq!(response.products.len(), 1);
        assert_eq!(response.products[0].pais, "No especificado");
    }

    #[tokio::test]
    async fn test_extracted_records_are_placed_before_preview() {
        let extractor = FixedExtractor(vec![
            ImportedProduct {
                titulo: "Halo 3".into(),
                ..Default::default()
            },
            ImportedProduct {
                titulo: "Podcast".into(),
                categoria: "podcasts".into(),
                ..Default::default()
            },
        ]);
        let response = extract(&extractor, pdf(), MIB).await.unwrap();
        assert_eq!(response.products.len(), 1);

        let record = response.products[0].clone();
        assert_eq!(record.categoria, "juegos");
        assert_eq!(record.subcategoria.as_deref(), Some("pc"));
        // То, что видно в предпросмотре, сохраняется без потерь
        assert!(record.into_new_product().is_ok());
    }

    #[tokio::test]
    async fn test_extract_without_products_is_an_error() {
        let extractor = FixedExtractor(vec![ImportedProduct::default()]);
        let err = extract(&extractor, pdf(), MIB).await.unwrap_err();
        assert!(matches!(err, ImportError::NoProducts));
    }
}
