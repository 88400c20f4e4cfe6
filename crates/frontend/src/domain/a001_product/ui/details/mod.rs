//! Форма товара (добавление и редактирование)
//!
//! - model.rs: запросы к API товаров
//! - view_model.rs: состояние формы и команды
//! - view.rs: компонент Leptos

mod model;
mod view;
mod view_model;

pub use model::delete_product;
pub use view::ProductDetails;
pub use view_model::ProductDetailsViewModel;
