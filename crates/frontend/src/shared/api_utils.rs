//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs and turning
//! HTTP failures into messages for the UI.

use gloo_net::http::{RequestBuilder, Response};
use serde::Deserialize;

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using port 3000 for the backend server.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Build a full API URL from a path
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Добавить `Authorization: Bearer` к запросу
pub fn with_auth(request: RequestBuilder, access_token: &str) -> RequestBuilder {
    request.header("Authorization", &format!("Bearer {}", access_token))
}

/// Ответ 401: токен администратора истёк или недействителен
pub const SESSION_EXPIRED: &str = "Sesión expirada. Vuelve a iniciar sesión";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Сообщение для пользователя по коду ответа
pub fn status_message(status: u16, detail: Option<&str>) -> String {
    match (status, detail) {
        (401, _) => SESSION_EXPIRED.to_string(),
        (403, _) => "No tienes permisos para esta acción".to_string(),
        (_, Some(detail)) if !detail.trim().is_empty() => detail.to_string(),
        (404, _) => "Recurso no encontrado".to_string(),
        (status, _) if status >= 500 => format!("Error del servidor ({})", status),
        (status, _) => format!("Error en la solicitud ({})", status),
    }
}

/// Текст ошибки из неуспешного ответа (`{error}` в теле, если есть)
pub async fn error_message(response: Response) -> String {
    let status = response.status();
    let detail = response.json::<ErrorBody>().await.ok().map(|b| b.error);
    status_message(status, detail.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_prefers_server_detail() {
        assert_eq!(
            status_message(502, Some("Error del servicio de extracción: HTTP 500")),
            "Error del servicio de extracción: HTTP 500"
        );
        assert_eq!(status_message(500, None), "Error del servidor (500)");
        assert_eq!(status_message(401, Some("ignored")), SESSION_EXPIRED);
    }
}
