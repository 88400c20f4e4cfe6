use serde::{Deserialize, Serialize};

use super::record::ImportedProduct;

/// Запрос на сохранение записей, полученных из PDF
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveImportRequest {
    pub products: Vec<ImportedProduct>,
}
