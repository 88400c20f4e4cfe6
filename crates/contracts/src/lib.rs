//! Общие типы и чистая логика каталога Mara Productions.
//!
//! Крейт собирается и для backend (native), и для frontend (wasm32),
//! поэтому здесь нет ни I/O, ни зависимостей от рантайма.

pub mod domain;
pub mod system;
pub mod usecases;
