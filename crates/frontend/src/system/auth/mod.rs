pub mod api;
pub mod context;
pub mod login_modal;
pub mod storage;
