use js_sys::Promise;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, File, FileReader, HtmlInputElement};

/// Первый выбранный файл из `<input type="file">`
pub fn selected_file(ev: &Event) -> Option<File> {
    ev.target()?
        .dyn_into::<HtmlInputElement>()
        .ok()?
        .files()?
        .get(0)
}

/// Сбросить `<input type="file">`, чтобы тот же файл можно было выбрать снова
pub fn reset_input(ev: &Event) {
    if let Some(input) = ev
        .target()
        .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
    {
        input.set_value("");
    }
}

/// Прочитать файл в `data:` URL
pub async fn read_as_data_url(file: &File) -> Result<String, String> {
    let reader = FileReader::new().map_err(|e| format!("FileReader: {:?}", e))?;

    let promise = Promise::new(&mut |resolve, reject| {
        let loaded = reader.clone();
        let onload = Closure::once_into_js(move || {
            let result = loaded.result().unwrap_or(JsValue::NULL);
            let _ = resolve.call1(&JsValue::NULL, &result);
        });
        let onerror = Closure::once_into_js(move || {
            let _ = reject.call1(&JsValue::NULL, &JsValue::from_str("read failed"));
        });
        reader.set_onload(Some(onload.unchecked_ref()));
        reader.set_onerror(Some(onerror.unchecked_ref()));
    });

    reader
        .read_as_data_url(file)
        .map_err(|e| format!("No se pudo leer el archivo: {:?}", e))?;

    let value = JsFuture::from(promise)
        .await
        .map_err(|e| format!("No se pudo leer el archivo: {:?}", e))?;
    value
        .as_string()
        .ok_or_else(|| "No se pudo leer el archivo".to_string())
}
