use contracts::system::auth::{LoginRequest, LoginResponse};
use gloo_net::http::Request;

use crate::shared::api_utils::api_url;

/// Вход администратора по паролю
pub async fn login(password: String) -> Result<LoginResponse, String> {
    let request = LoginRequest { password };

    let response = Request::post(&api_url("/api/auth/login"))
        .json(&request)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("No se pudo conectar con el servidor: {}", e))?;

    if response.status() == 401 {
        return Err("Contraseña incorrecta. Inténtalo de nuevo.".to_string());
    }
    if !response.ok() {
        return Err(format!("Login failed: {}", response.status()));
    }

    response
        .json::<LoginResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
