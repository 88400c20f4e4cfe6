use serde::{Deserialize, Serialize};

use super::record::ImportedProduct;

/// Ответ на загрузку PDF: записи в порядке извлечения
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PdfImportResponse {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub products: Vec<ImportedProduct>,
}

impl PdfImportResponse {
    pub fn extracted(products: Vec<ImportedProduct>) -> Self {
        Self {
            success: true,
            message: format!("Se extrajeron {} productos del PDF", products.len()),
            products,
        }
    }
}

/// Ответ на сохранение импорта
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveImportResponse {
    pub success: bool,
    pub message: String,
    pub saved_count: usize,
}

impl SaveImportResponse {
    pub fn saved(saved_count: usize) -> Self {
        Self {
            success: true,
            message: format!("Se guardaron {} productos en el catálogo", saved_count),
            saved_count,
        }
    }
}
