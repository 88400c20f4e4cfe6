use contracts::domain::a001_product::{
    check_upload, ImageSource, UploadKind, UploadLimits, UploadedImage, MIB,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::file_reader::{read_as_data_url, reset_input, selected_file};
use crate::shared::icons::icon;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PickerMode {
    Url,
    Upload,
}

/// Выбор изображения: ссылка или загрузка файла с предпросмотром.
///
/// Тип и размер файла проверяются до чтения.
#[component]
pub fn ImageSourcePicker(
    source: RwSignal<Option<ImageSource>>,
    kind: UploadKind,
    #[prop(optional)] limits: Option<UploadLimits>,
    /// Ошибка поля из проверки формы
    #[prop(into)]
    field_error: Signal<Option<String>>,
) -> impl IntoView {
    let limits = limits.unwrap_or_default();
    let initial_mode = match source.get_untracked() {
        Some(ImageSource::Upload(_)) => PickerMode::Upload,
        _ => PickerMode::Url,
    };
    let mode = RwSignal::new(initial_mode);
    let upload_error = RwSignal::new(None::<String>);
    let (url_label, upload_label) = match kind {
        UploadKind::ProductImage => ("URL de Imagen", "Subir Archivo"),
        UploadKind::Logo => ("URL del Logo", "Subir Logo"),
    };

    let url_value = move || match source.get() {
        Some(ImageSource::Url(url)) => url,
        _ => String::new(),
    };

    let on_url_input = move |ev| {
        let value = event_target_value(&ev);
        let url = value.trim();
        upload_error.set(None);
        source.set((!url.is_empty()).then(|| ImageSource::Url(url.to_string())));
    };

    let on_file_change = move |ev: web_sys::Event| {
        let Some(file) = selected_file(&ev) else {
            return;
        };
        let content_type = file.type_();
        let size = file.size() as u64;
        if let Err(errors) = check_upload(kind, &content_type, size, &limits) {
            upload_error.set(errors.for_field(kind.field()).map(str::to_string));
            reset_input(&ev);
            return;
        }
        upload_error.set(None);
        spawn_local(async move {
            match read_as_data_url(&file).await {
                Ok(data_url) => source.set(Some(ImageSource::Upload(UploadedImage {
                    content_type,
                    size,
                    data_url,
                }))),
                Err(e) => upload_error.set(Some(e)),
            }
        });
    };

    let clear = move |_| {
        source.set(None);
        upload_error.set(None);
    };

    let preview = move || match source.get() {
        Some(ImageSource::Url(url)) => Some(url),
        Some(ImageSource::Upload(upload)) => Some(upload.data_url),
        None => None,
    };

    let uploaded_info = move || match source.get() {
        Some(ImageSource::Upload(upload)) => Some(format!(
            "{} ({:.2} MB)",
            upload.content_type,
            upload.size as f64 / MIB as f64
        )),
        _ => None,
    };

    let shown_error = move || upload_error.get().or_else(|| field_error.get());

    view! {
        <div class="image-picker">
            <div class="image-picker__modes">
                <button
                    type="button"
                    class=move || if mode.get() == PickerMode::Url { "chip chip--active" } else { "chip" }
                    on:click=move |_| mode.set(PickerMode::Url)
                >
                    {url_label}
                </button>
                <button
                    type="button"
                    class=move || if mode.get() == PickerMode::Upload { "chip chip--active" } else { "chip" }
                    on:click=move |_| mode.set(PickerMode::Upload)
                >
                    {upload_label}
                </button>
            </div>

            <Show
                when=move || mode.get() == PickerMode::Url
                fallback=move || view! {
                    <div class="image-picker__upload">
                        <label class="button button--secondary">
                            {icon("upload")}
                            "Seleccionar archivo"
                            <input type="file" accept="image/*" class="visually-hidden" on:change=on_file_change />
                        </label>
                        {move || uploaded_info().map(|info| view! {
                            <span class="image-picker__info">{info}</span>
                        })}
                    </div>
                }
            >
                <input
                    type="url"
                    class="form-input"
                    placeholder="https://ejemplo.com/imagen.jpg"
                    prop:value=url_value
                    on:input=on_url_input
                />
            </Show>

            {move || shown_error().map(|e| view! { <p class="field-error">{e}</p> })}

            {move || preview().map(|src| view! {
                <div class="image-picker__preview">
                    <img src=src alt="Vista previa" />
                    <button type="button" class="button button--icon" title="Quitar" on:click=clear>
                        {icon("x")}
                    </button>
                </div>
            })}
        </div>
    }
}
