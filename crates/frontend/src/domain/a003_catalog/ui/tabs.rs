use contracts::domain::a002_category::{categories, subcategories_of};
use leptos::prelude::*;

use crate::layout::global_context::use_app_context;

fn tab_class(base: &str, active: bool) -> String {
    if active {
        format!("{base} {base}--active")
    } else {
        base.to_string()
    }
}

/// Вкладки категорий
#[component]
pub fn CategoryTabs() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <nav class="category-tabs">
            {categories()
                .map(|def| {
                    let key = def.key;
                    let is_active = move || ctx.selection.with(|s| s.category == key);
                    view! {
                        <button
                            class=move || tab_class("category-tabs__tab", is_active())
                            on:click=move |_| ctx.select_category(key)
                        >
                            {def.label}
                        </button>
                    }
                })
                .collect_view()}
        </nav>
    }
}

/// Подвкладки выбранной категории; у плоских категорий их нет
#[component]
pub fn SubcategoryTabs() -> impl IntoView {
    let ctx = use_app_context();

    move || {
        let (category, searching) = ctx.selection.with(|s| (s.category.clone(), s.is_searching()));
        let subs = subcategories_of(&category).ok().flatten();
        match subs {
            Some(subs) if !searching => view! {
                <nav class="subcategory-tabs">
                    {subs
                        .iter()
                        .map(|sub| {
                            let key = sub.key;
                            let is_active = move || {
                                ctx.selection.with(|s| s.subcategory.as_deref() == Some(key))
                            };
                            view! {
                                <button
                                    class=move || tab_class("subcategory-tabs__tab", is_active())
                                    on:click=move |_| ctx.select_subcategory(key)
                                >
                                    {sub.label}
                                </button>
                            }
                        })
                        .collect_view()}
                </nav>
            }
            .into_any(),
            _ => ().into_any(),
        }
    }
}
