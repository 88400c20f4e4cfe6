use leptos::prelude::*;

use crate::layout::global_context::use_app_context;
use crate::shared::icons::icon;

fn current_year() -> u32 {
    js_sys::Date::new_0().get_full_year()
}

/// Подвал: соцсети, бизнес-группы и копирайт
#[component]
pub fn Footer() -> impl IntoView {
    let ctx = use_app_context();

    let networks = move || ctx.social.with(|s| s.social_networks.clone());
    let groups = move || ctx.social.with(|s| s.business_groups.clone());

    view! {
        <footer data-zone="footer" class="footer">
            <div class="footer__columns">
                <Show when=move || ctx.social.with(|s| !s.social_networks.is_empty())>
                    <div class="footer__column">
                        <h4 class="footer__heading">"Síguenos"</h4>
                        <ul class="footer__links">
                            {move || networks().into_iter().map(|network| view! {
                                <li>
                                    <a href=network.url target="_blank" rel="noopener noreferrer">
                                        {network.name}
                                        {icon("external-link")}
                                    </a>
                                </li>
                            }).collect_view()}
                        </ul>
                    </div>
                </Show>

                <Show when=move || ctx.social.with(|s| !s.business_groups.is_empty())>
                    <div class="footer__column">
                        <h4 class="footer__heading">"Nuestros Grupos"</h4>
                        <ul class="footer__groups">
                            {move || groups().into_iter().map(|group| {
                                let has_link = !group.link.trim().is_empty();
                                view! {
                                    <li class="footer__group">
                                        {if has_link {
                                            view! {
                                                <a href=group.link target="_blank" rel="noopener noreferrer">
                                                    {group.name}
                                                </a>
                                            }.into_any()
                                        } else {
                                            view! { <span>{group.name}</span> }.into_any()
                                        }}
                                        <p class="footer__group-description">{group.description}</p>
                                    </li>
                                }
                            }).collect_view()}
                        </ul>
                    </div>
                </Show>
            </div>
            <div class="footer__copyright">
                {format!("© {} Mara Productions. Todos los derechos reservados.", current_year())}
            </div>
        </footer>
    }
}
