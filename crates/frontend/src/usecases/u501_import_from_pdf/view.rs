use contracts::domain::a002_category::label_for;
use contracts::usecases::u501_import_from_pdf::ImportedProduct;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::File;

use super::api;
use crate::layout::global_context::use_app_context;
use crate::shared::file_reader::{reset_input, selected_file};
use crate::shared::icons::icon;
use crate::system::auth::context::{current_token, forget_expired_session, use_auth};

const NOTICE_TIMEOUT_MS: u32 = 5_000;

/// Вкладка "Importar PDF": извлечь товары из каталога PDF и сохранить
#[component]
pub fn PdfImportView() -> impl IntoView {
    let ctx = use_app_context();
    let (auth_state, set_auth_state) = use_auth();
    let file = RwSignal::new_local(None::<File>);
    let file_name = RwSignal::new(None::<String>);
    let extracted = RwSignal::new(Vec::<ImportedProduct>::new());
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);
    let processing = RwSignal::new(false);
    let saving = RwSignal::new(false);

    let show_notice = move |message: String| {
        notice.set(Some(message.clone()));
        spawn_local(async move {
            TimeoutFuture::new(NOTICE_TIMEOUT_MS).await;
            // более новое сообщение не трогаем
            notice.update(|n| {
                if n.as_deref() == Some(message.as_str()) {
                    *n = None;
                }
            });
        });
    };

    let on_file_change = move |ev: leptos::ev::Event| {
        error.set(None);
        extracted.set(Vec::new());
        let Some(selected) = selected_file(&ev) else {
            return;
        };
        match api::check_pdf(&selected.name(), &selected.type_(), selected.size() as u64) {
            Ok(()) => {
                file_name.set(Some(selected.name()));
                file.set(Some(selected));
            }
            Err(e) => {
                error.set(Some(e));
                file.set(None);
                file_name.set(None);
                reset_input(&ev);
            }
        }
    };

    let process = move |_| {
        if processing.get_untracked() {
            return;
        }
        let Some(selected) = file.get_untracked() else {
            error.set(Some("Selecciona un archivo PDF".to_string()));
            return;
        };
        let token = match current_token(auth_state) {
            Ok(token) => token,
            Err(e) => {
                error.set(Some(e));
                return;
            }
        };
        error.set(None);
        processing.set(true);
        spawn_local(async move {
            match api::upload_pdf(&selected, &token).await {
                Ok(response) => {
                    log::info!("PDF import extracted {} products", response.products.len());
                    extracted.set(response.products);
                    show_notice(response.message);
                }
                Err(e) => {
                    forget_expired_session(&e, set_auth_state);
                    error.set(Some(e));
                }
            }
            processing.set(false);
        });
    };

    let save = move |_| {
        if saving.get_untracked() {
            return;
        }
        let products = extracted.get_untracked();
        if products.is_empty() {
            return;
        }
        let token = match current_token(auth_state) {
            Ok(token) => token,
            Err(e) => {
                error.set(Some(e));
                return;
            }
        };
        error.set(None);
        saving.set(true);
        spawn_local(async move {
            match api::save_import(products, &token).await {
                Ok(response) => {
                    extracted.set(Vec::new());
                    file.set(None);
                    file_name.set(None);
                    ctx.reload_catalog();
                    show_notice(response.message);
                }
                Err(e) => {
                    forget_expired_session(&e, set_auth_state);
                    error.set(Some(e));
                }
            }
            saving.set(false);
        });
    };

    let discard = move |_| {
        extracted.set(Vec::new());
        notice.set(None);
    };

    view! {
        <section class="admin-section pdf-import">
            <h3 class="admin-section__title">"Importar Productos desde PDF"</h3>
            <p class="admin-section__hint">
                "Sube un catálogo en PDF (máximo 10MB). Los productos detectados se mostrarán antes de guardarlos."
            </p>

            <label class="file-drop">
                {icon("file-text")}
                <span>{move || file_name.get().unwrap_or_else(|| "Seleccionar archivo PDF".to_string())}</span>
                <input type="file" accept="application/pdf,.pdf" class="file-drop__input" on:change=on_file_change />
            </label>

            <div class="form-actions">
                <button
                    class="button button--primary"
                    disabled=move || processing.get() || file_name.get().is_none()
                    on:click=process
                >
                    {icon("upload")}
                    {move || if processing.get() { "Procesando PDF..." } else { "Procesar PDF" }}
                </button>
            </div>

            {move || error.get().map(|e| view! { <div class="warning-box">{icon("alert")}{e}</div> })}
            {move || notice.get().map(|n| view! { <div class="success-box">{icon("check")}{n}</div> })}

            <Show when=move || extracted.with(|p| !p.is_empty())>
                <div class="import-preview">
                    <h4>{move || format!("Productos encontrados ({})", extracted.with(Vec::len))}</h4>
                    <ul class="import-preview__list">
                        {move || extracted.get().into_iter().map(|p| {
                            let category = label_for(&p.categoria).unwrap_or("Sin categoría");
                            view! {
                                <li class="import-preview__item">
                                    <span class="import-preview__title">{p.titulo}</span>
                                    <span class="import-preview__meta">{format!("{} · {}", category, p.pais)}</span>
                                </li>
                            }
                        }).collect_view()}
                    </ul>
                    <div class="form-actions">
                        <button class="button button--primary" disabled=move || saving.get() on:click=save>
                            {icon("save")}
                            {move || if saving.get() {
                                "Guardando...".to_string()
                            } else {
                                format!("Guardar {} productos", extracted.with(Vec::len))
                            }}
                        </button>
                        <button class="button button--secondary" on:click=discard>"Descartar"</button>
                    </div>
                </div>
            </Show>
        </section>
    }
}
