use axum::extract::Path;
use axum::Json;
use contracts::domain::a004_site_config::SiteConfigEntry;

use super::error::ApiError;
use crate::domain::a004_site_config;

/// GET /api/config/:key
pub async fn get(Path(key): Path<String>) -> Result<Json<SiteConfigEntry>, ApiError> {
    Ok(Json(a004_site_config::service::get(&key).await?))
}

/// POST /api/config
pub async fn upsert(Json(entry): Json<SiteConfigEntry>) -> Result<Json<SiteConfigEntry>, ApiError> {
    Ok(Json(a004_site_config::service::save(entry).await?))
}
