use leptos::prelude::*;

use crate::layout::global_context::use_app_context;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;

#[component]
pub fn Header() -> impl IntoView {
    let ctx = use_app_context();
    let (auth_state, _) = use_auth();
    let logo_failed = RwSignal::new(false);

    // новый логотип получает ещё одну попытку загрузки
    Effect::new(move |_| {
        ctx.logo.track();
        logo_failed.set(false);
    });

    let logo = move || {
        let src = ctx.logo.get();
        if src.trim().is_empty() || logo_failed.get() {
            view! { <span class="header__logo-fallback">"MP"</span> }.into_any()
        } else {
            view! {
                <img
                    class="header__logo"
                    src=src
                    alt="Mara Productions"
                    on:error=move |_| logo_failed.set(true)
                />
            }
            .into_any()
        }
    };

    view! {
        <header data-zone="header" class="header">
            <div class="header__content">
                {logo}
                <span class="header__title">"Mara Productions"</span>
            </div>
            <div class="header__actions">
                <button
                    class="button button--ghost"
                    aria-label="Admin"
                    on:click=move |_| ctx.open_admin(auth_state.get_untracked().is_admin())
                >
                    {icon("settings")}
                    "Admin"
                </button>
            </div>
        </header>
    }
}
