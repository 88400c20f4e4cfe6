use contracts::domain::a004_site_config::SiteConfigEntry;
use gloo_net::http::Request;

use crate::shared::api_utils::{api_url, error_message, with_auth};

/// Значение настройки; неизвестный ключ приходит пустым
pub async fn fetch_entry(key: &str) -> Result<SiteConfigEntry, String> {
    let response = Request::get(&api_url(&format!("/api/config/{}", key)))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    response
        .json::<SiteConfigEntry>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Сохранить настройку (только администратор)
pub async fn save_entry(entry: &SiteConfigEntry, access_token: &str) -> Result<SiteConfigEntry, String> {
    let response = with_auth(Request::post(&api_url("/api/config")), access_token)
        .json(entry)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("No se pudo guardar la configuración: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    response
        .json::<SiteConfigEntry>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
