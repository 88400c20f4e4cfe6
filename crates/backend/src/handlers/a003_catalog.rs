use axum::Json;
use contracts::domain::a002_category::{CategoryDef, CATEGORY_INDEX};
use contracts::domain::a003_catalog::CatalogStore;

use super::error::ApiError;
use crate::domain::a003_catalog;

/// GET /api/catalog
pub async fn get_catalog() -> Result<Json<CatalogStore>, ApiError> {
    Ok(Json(a003_catalog::service::load_catalog().await?))
}

/// GET /api/categories
pub async fn list_categories() -> Json<&'static [CategoryDef]> {
    Json(CATEGORY_INDEX)
}
