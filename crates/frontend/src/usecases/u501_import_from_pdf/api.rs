use contracts::usecases::u501_import_from_pdf::{
    ImportedProduct, PdfImportResponse, SaveImportRequest, SaveImportResponse, DEFAULT_MAX_PDF_BYTES,
};
use gloo_net::http::Request;
use wasm_bindgen::JsCast;
use web_sys::{File, FormData, RequestInit, RequestMode, Response};

use crate::shared::api_utils::{api_url, error_message, status_message, with_auth};

/// Проверка файла до отправки: PDF и не больше лимита
pub fn check_pdf(name: &str, content_type: &str, size: u64) -> Result<(), String> {
    let is_pdf = content_type == "application/pdf" || name.to_lowercase().ends_with(".pdf");
    if !is_pdf {
        return Err("Por favor selecciona un archivo PDF".to_string());
    }
    if size > DEFAULT_MAX_PDF_BYTES {
        return Err(format!(
            "El archivo es demasiado grande. Máximo {}MB",
            DEFAULT_MAX_PDF_BYTES / (1024 * 1024)
        ));
    }
    Ok(())
}

/// Отправить PDF на извлечение (multipart, поле `file`)
pub async fn upload_pdf(file: &File, access_token: &str) -> Result<PdfImportResponse, String> {
    let form_data = FormData::new().map_err(|e| format!("{e:?}"))?;
    form_data
        .append_with_blob_and_filename("file", file, &file.name())
        .map_err(|e| format!("{e:?}"))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&form_data);

    let url = api_url("/api/u501/import/pdf");
    let request = web_sys::Request::new_with_str_and_init(&url, &opts)
        .map_err(|e| format!("Failed to create request: {e:?}"))?;
    request
        .headers()
        .set("Authorization", &format!("Bearer {}", access_token))
        .map_err(|e| format!("Failed to set header: {e:?}"))?;

    let window = web_sys::window().ok_or_else(|| "No window object".to_string())?;
    let response_value = wasm_bindgen_futures::JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|_| "Error de conexión con el servidor".to_string())?;
    let response: Response = response_value
        .dyn_into()
        .map_err(|_| "Not a Response".to_string())?;

    let json = match response.json() {
        Ok(promise) => wasm_bindgen_futures::JsFuture::from(promise).await.ok(),
        Err(_) => None,
    };

    if !response.ok() {
        let detail = json
            .and_then(|value| serde_wasm_bindgen::from_value::<serde_json::Value>(value).ok())
            .and_then(|body| body.get("error").and_then(|e| e.as_str()).map(str::to_string));
        return Err(status_message(response.status(), detail.as_deref()));
    }

    let json = json.ok_or_else(|| "Respuesta inválida del servidor".to_string())?;
    serde_wasm_bindgen::from_value(json).map_err(|e| format!("Failed to parse response: {}", e))
}

/// Сохранить проверенные записи в каталог
pub async fn save_import(
    products: Vec<ImportedProduct>,
    access_token: &str,
) -> Result<SaveImportResponse, String> {
    let body = SaveImportRequest { products };
    let response = with_auth(Request::post(&api_url("/api/u501/import/save")), access_token)
        .json(&body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("No se pudieron guardar los productos: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    response
        .json::<SaveImportResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
