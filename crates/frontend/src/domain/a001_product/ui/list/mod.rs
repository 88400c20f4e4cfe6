use contracts::domain::a002_category::{label_for, subcategory_label, Placement};
use contracts::domain::a003_catalog::CatalogEntry;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a001_product::ui::details::delete_product;
use crate::layout::global_context::use_app_context;
use crate::shared::icons::icon;
use crate::shared::modal::ConfirmDialog;
use crate::system::auth::context::{current_token, forget_expired_session, use_auth};

fn placement_label(placement: &Placement) -> String {
    let category = label_for(placement.category()).unwrap_or(placement.category());
    match placement.subcategory() {
        Some(sub) => {
            let sub_label = subcategory_label(placement.category(), sub).unwrap_or(sub);
            format!("{} / {}", category, sub_label)
        }
        None => category.to_string(),
    }
}

/// Список товаров каталога с правкой и удалением
#[component]
pub fn ProductList(on_edit: Callback<CatalogEntry>) -> impl IntoView {
    let ctx = use_app_context();
    let (auth_state, set_auth_state) = use_auth();
    let pending_delete = RwSignal::new(None::<CatalogEntry>);
    let error = RwSignal::new(None::<String>);

    let entries = move || {
        ctx.catalog
            .with(|c| c.as_ref().map(|store| store.entries()).unwrap_or_default())
    };

    let confirm_delete = Callback::new(move |_| {
        let Some(entry) = pending_delete.get_untracked() else {
            return;
        };
        pending_delete.set(None);
        let token = match current_token(auth_state) {
            Ok(token) => token,
            Err(e) => {
                error.set(Some(e));
                return;
            }
        };
        spawn_local(async move {
            match delete_product(&entry.product.id, &token).await {
                Ok(()) => {
                    error.set(None);
                    ctx.reload_catalog();
                }
                Err(e) => {
                    forget_expired_session(&e, set_auth_state);
                    error.set(Some(e));
                }
            }
        });
    });

    view! {
        <section class="admin-section product-list">
            <h3 class="admin-section__title">
                {move || format!("Productos ({})", ctx.catalog.with(|c| c.as_ref().map_or(0, |s| s.len())))}
            </h3>

            {move || error.get().map(|e| view! { <div class="warning-box">{e}</div> })}

            <ul class="product-list__items">
                <For
                    each=entries
                    key=|entry| (entry.product.id.clone(), entry.product.titulo.clone(), entry.placement.clone())
                    children=move |entry| {
                        let title = entry.product.titulo.clone();
                        let location = placement_label(&entry.placement);
                        let for_edit = entry.clone();
                        let for_delete = entry;
                        view! {
                            <li class="product-list__item">
                                <div class="product-list__info">
                                    <span class="product-list__title">{title}</span>
                                    <span class="product-list__placement">{location}</span>
                                </div>
                                <div class="product-list__actions">
                                    <button
                                        class="button button--icon"
                                        title="Editar"
                                        on:click=move |_| on_edit.run(for_edit.clone())
                                    >
                                        {icon("edit")}
                                    </button>
                                    <button
                                        class="button button--icon button--danger"
                                        title="Eliminar"
                                        on:click=move |_| pending_delete.set(Some(for_delete.clone()))
                                    >
                                        {icon("trash")}
                                    </button>
                                </div>
                            </li>
                        }
                    }
                />
            </ul>

            {move || pending_delete.get().map(|entry| view! {
                <ConfirmDialog
                    message=format!("¿Eliminar \"{}\"?", entry.product.titulo)
                    on_confirm=confirm_delete
                    on_cancel=Callback::new(move |_| pending_delete.set(None))
                />
            })}
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_label_uses_index_labels() {
        let grouped = Placement::resolve("juegos", Some("pc")).unwrap();
        assert!(placement_label(&grouped).contains(" / "));

        let flat = Placement::resolve("seriesTV", None).unwrap();
        assert!(!placement_label(&flat).contains('/'));
    }
}
