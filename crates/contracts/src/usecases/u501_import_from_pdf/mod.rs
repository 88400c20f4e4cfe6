pub mod record;
pub mod request;
pub mod response;

pub use record::{ImportedProduct, DEFAULT_IMPORT_CATEGORY, DEFAULT_IMPORT_DATE};
pub use request::SaveImportRequest;
pub use response::{PdfImportResponse, SaveImportResponse};

use crate::usecases::common::UseCaseMetadata;

/// Максимальный размер PDF по умолчанию
pub const DEFAULT_MAX_PDF_BYTES: u64 = 10 * 1024 * 1024;

pub struct ImportFromPdf;

impl UseCaseMetadata for ImportFromPdf {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "import_from_pdf"
    }

    fn display_name() -> &'static str {
        "Importar PDF"
    }

    fn description() -> &'static str {
        "Extracción de productos desde un catálogo PDF mediante un servicio externo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_names() {
        assert_eq!(ImportFromPdf::full_name(), "u501_import_from_pdf");
        assert_eq!(ImportFromPdf::api_prefix(), "/api/u501");
    }
}
