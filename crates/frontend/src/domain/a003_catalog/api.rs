use contracts::domain::a003_catalog::CatalogStore;
use gloo_net::http::Request;

use crate::shared::api_utils::{api_url, error_message};

/// Весь каталог (полки по категориям)
pub async fn fetch_catalog() -> Result<CatalogStore, String> {
    let response = Request::get(&api_url("/api/catalog"))
        .send()
        .await
        .map_err(|e| format!("No se pudo cargar el catálogo: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    response
        .json::<CatalogStore>()
        .await
        .map_err(|e| format!("Failed to parse catalog: {}", e))
}
