pub mod error;
pub mod executor;
pub mod extractor;

pub use error::ImportError;
pub use extractor::{HttpExtractor, PdfUpload, ProductExtractor};
