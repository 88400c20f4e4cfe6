pub mod api_utils;
pub mod file_reader;
pub mod icons;
pub mod image_picker;
pub mod modal;
pub mod search_input;
