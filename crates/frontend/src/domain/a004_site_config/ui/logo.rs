use contracts::domain::a001_product::{ImageSource, UploadKind};
use contracts::domain::a004_site_config::validate_logo;
use contracts::domain::common::FormField;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a004_site_config::api;
use crate::layout::global_context::use_app_context;
use crate::shared::icons::icon;
use crate::shared::image_picker::ImageSourcePicker;
use crate::system::auth::context::{current_token, forget_expired_session, use_auth};

/// Вкладка "Logo": логотип сайта
#[component]
pub fn LogoSettings() -> impl IntoView {
    let ctx = use_app_context();
    let (auth_state, set_auth_state) = use_auth();
    let source = RwSignal::new(ImageSource::from_reference(&ctx.logo.get_untracked()));
    let field_error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let save = move |_| {
        if saving.get_untracked() {
            return;
        }
        notice.set(None);
        error.set(None);
        let entry = match validate_logo(source.get_untracked().as_ref(), &Default::default()) {
            Ok(entry) => entry,
            Err(errors) => {
                field_error.set(errors.for_field(FormField::Logo).map(str::to_string));
                return;
            }
        };
        field_error.set(None);
        let token = match current_token(auth_state) {
            Ok(token) => token,
            Err(e) => {
                error.set(Some(e));
                return;
            }
        };
        saving.set(true);
        spawn_local(async move {
            match api::save_entry(&entry, &token).await {
                Ok(saved) => {
                    ctx.logo.set(saved.value);
                    notice.set(Some("Logo actualizado".to_string()));
                }
                Err(e) => {
                    forget_expired_session(&e, set_auth_state);
                    error.set(Some(e));
                }
            }
            saving.set(false);
        });
    };

    view! {
        <section class="admin-section">
            <h3 class="admin-section__title">"Logo de la Página"</h3>
            <ImageSourcePicker source=source kind=UploadKind::Logo field_error=field_error />

            {move || error.get().map(|e| view! { <div class="warning-box">{e}</div> })}
            {move || notice.get().map(|n| view! { <div class="success-box">{n}</div> })}

            <div class="form-actions">
                <button class="button button--primary" disabled=move || saving.get() on:click=save>
                    {icon("save")}
                    {move || if saving.get() { "Guardando..." } else { "Guardar Logo" }}
                </button>
            </div>
        </section>
    }
}
