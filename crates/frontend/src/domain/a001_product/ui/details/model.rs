use contracts::domain::a001_product::{ProductCreated, ProductDto, ProductId};
use gloo_net::http::Request;

use crate::shared::api_utils::{api_url, error_message, with_auth};

/// Создать товар; сервер назначает id
pub async fn create_product(dto: &ProductDto, access_token: &str) -> Result<ProductId, String> {
    let response = with_auth(Request::post(&api_url("/api/products")), access_token)
        .json(dto)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("No se pudo guardar el producto: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    response
        .json::<ProductCreated>()
        .await
        .map(|created| created.id)
        .map_err(|e| format!("Failed to parse response: {}", e))
}

pub async fn update_product(id: &ProductId, dto: &ProductDto, access_token: &str) -> Result<(), String> {
    let url = api_url(&format!("/api/products/{}", id));
    let response = with_auth(Request::put(&url), access_token)
        .json(dto)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("No se pudo guardar el producto: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }
    Ok(())
}

pub async fn delete_product(id: &ProductId, access_token: &str) -> Result<(), String> {
    let url = api_url(&format!("/api/products/{}", id));
    let response = with_auth(Request::delete(&url), access_token)
        .send()
        .await
        .map_err(|e| format!("No se pudo eliminar el producto: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }
    Ok(())
}
