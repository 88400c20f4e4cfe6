use contracts::domain::a003_catalog::CatalogEntry;
use leptos::prelude::*;

use crate::domain::a001_product::ui::details::{ProductDetails, ProductDetailsViewModel};
use crate::domain::a001_product::ui::list::ProductList;
use crate::domain::a004_site_config::ui::logo::LogoSettings;
use crate::domain::a004_site_config::ui::social::SocialSettings;
use crate::layout::global_context::use_app_context;
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use crate::system::auth::context::{do_logout, use_auth};
use crate::usecases::u501_import_from_pdf::view::PdfImportView;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AdminTab {
    Products,
    Logo,
    Social,
    Import,
}

impl AdminTab {
    const ALL: [AdminTab; 4] = [AdminTab::Products, AdminTab::Logo, AdminTab::Social, AdminTab::Import];

    fn label(&self) -> &'static str {
        match self {
            AdminTab::Products => "Productos",
            AdminTab::Logo => "Logo",
            AdminTab::Social => "Redes Sociales",
            AdminTab::Import => "Importar PDF",
        }
    }
}

#[component]
fn ProductsTab() -> impl IntoView {
    let ctx = use_app_context();
    let vm = ProductDetailsViewModel::new();
    let on_saved = Callback::new(move |_| ctx.reload_catalog());
    let on_edit = Callback::new(move |entry: CatalogEntry| vm.start_edit(&entry));

    view! {
        <ProductDetails vm=vm on_saved=on_saved />
        <ProductList on_edit=on_edit />
    }
}

/// Панель администратора
#[component]
pub fn AdminPanel() -> impl IntoView {
    let ctx = use_app_context();
    let (_, set_auth_state) = use_auth();
    let active = RwSignal::new(AdminTab::Products);

    let logout = move |_| {
        do_logout(set_auth_state);
        ctx.admin_open.set(false);
    };

    view! {
        <Modal
            title="Panel de Administración"
            on_close=Callback::new(move |_| ctx.admin_open.set(false))
            class="modal--wide"
        >
            <div class="admin-panel">
                <nav class="admin-panel__tabs">
                    {AdminTab::ALL
                        .into_iter()
                        .map(|tab| view! {
                            <button
                                class=move || {
                                    if active.get() == tab { "tab tab--active" } else { "tab" }
                                }
                                on:click=move |_| active.set(tab)
                            >
                                {tab.label()}
                            </button>
                        })
                        .collect_view()}
                    <button class="button button--secondary admin-panel__logout" on:click=logout>
                        "Cerrar Sesión"
                    </button>
                </nav>

                <div class="admin-panel__content">
                    {move || match active.get() {
                        AdminTab::Products => view! { <ProductsTab /> }.into_any(),
                        AdminTab::Logo => view! { <LogoSettings /> }.into_any(),
                        AdminTab::Social => view! { <SocialSettings /> }.into_any(),
                        AdminTab::Import => view! { <PdfImportView /> }.into_any(),
                    }}
                </div>
            </div>
        </Modal>
    }
}
