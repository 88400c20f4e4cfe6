pub mod aggregate;
pub mod form;
pub mod release_date;

pub use aggregate::{Product, ProductCreated, ProductDto, ProductId, PLACEHOLDER_IMAGE_URL};
pub use form::{
    check_upload, ImageSource, NewProduct, ProductForm, UploadKind, UploadLimits, UploadedImage, MIB,
};
pub use release_date::{format_release_date, parse_release_date};
