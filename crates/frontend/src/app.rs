use leptos::prelude::*;

use crate::domain::a003_catalog::ui::gallery::Gallery;
use crate::domain::a003_catalog::ui::tabs::{CategoryTabs, SubcategoryTabs};
use crate::layout::admin_panel::AdminPanel;
use crate::layout::footer::Footer;
use crate::layout::global_context::{use_app_context, AppGlobalContext};
use crate::layout::header::Header;
use crate::shared::icons::icon;
use crate::shared::search_input::SearchInput;
use crate::system::auth::context::{use_auth, AuthProvider};
use crate::system::auth::login_modal::LoginModal;

#[component]
pub fn App() -> impl IntoView {
    // Provide the AppGlobalContext store to the whole app via context.
    let ctx = AppGlobalContext::new();
    provide_context(ctx);
    ctx.init_router_integration();
    ctx.reload_catalog();
    ctx.load_site_config();

    view! {
        <AuthProvider>
            <CatalogPage />
        </AuthProvider>
    }
}

#[component]
fn CatalogPage() -> impl IntoView {
    let ctx = use_app_context();
    let (auth_state, _) = use_auth();

    let on_search = Callback::new(move |query: String| ctx.set_query(query));
    let reset_search = Signal::derive(move || ctx.search_reset.get());

    view! {
        <div class="app-layout">
            <Header />

            <main class="app-main">
                <section class="hero">
                    <h1 class="hero__title">"Catálogo Mara Productions"</h1>
                    <p class="hero__subtitle">
                        "Juegos, aplicaciones, series, películas y más en un solo lugar"
                    </p>
                    <SearchInput on_change=on_search reset_on=reset_search />
                </section>

                {move || ctx.load_error.get().map(|e| view! {
                    <div class="warning-box">
                        {icon("alert")}
                        <span class="warning-box__text">{e}</span>
                    </div>
                })}

                <CategoryTabs />
                <SubcategoryTabs />
                <Gallery />
            </main>

            <Footer />

            // Панель видна только с действующей сессией
            <Show when=move || ctx.admin_open.get() && auth_state.with(|s| s.is_admin())>
                <AdminPanel />
            </Show>
            <Show when=move || ctx.login_open.get()>
                <LoginModal />
            </Show>
        </div>
    }
}
