use contracts::domain::a004_site_config::{BusinessGroup, SocialConfig};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a004_site_config::api;
use crate::layout::global_context::use_app_context;
use crate::shared::icons::icon;
use crate::system::auth::context::{current_token, forget_expired_session, use_auth};

/// Вкладка "Redes Sociales": ссылки на сети и бизнес-группы
#[component]
pub fn SocialSettings() -> impl IntoView {
    let ctx = use_app_context();
    let (auth_state, set_auth_state) = use_auth();
    let form = RwSignal::new(ctx.social.get_untracked().merged_into_defaults());
    let notice = RwSignal::new(None::<String>);
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    // ввод в поля не меняет длину списков, поэтому строки не пересоздаются
    let network_count = Memo::new(move |_| form.with(|f| f.social_networks.len()));
    let group_count = Memo::new(move |_| form.with(|f| f.business_groups.len()));

    let add_group = move |_| {
        form.update(|f| f.business_groups.push(BusinessGroup::default()));
    };

    let save = move |_| {
        if saving.get_untracked() {
            return;
        }
        notice.set(None);
        error.set(None);
        let entry = match form.get_untracked().into_entry() {
            Ok(entry) => entry,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
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
                    ctx.social
                        .set(SocialConfig::from_entry(&saved).unwrap_or_default());
                    notice.set(Some("Configuración guardada".to_string()));
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
            <h3 class="admin-section__title">"Redes Sociales"</h3>
            {move || (0..network_count.get())
                .map(|index| {
                    let name = form.with_untracked(|f| {
                        f.social_networks.get(index).map(|n| n.name.clone()).unwrap_or_default()
                    });
                    view! {
                        <div class="form-group">
                            <label>{name.clone()}</label>
                            <input
                                type="url"
                                class="form-input"
                                placeholder=format!("URL de {}", name)
                                prop:value=move || form.with(|f| {
                                    f.social_networks.get(index).map(|n| n.url.clone()).unwrap_or_default()
                                })
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    form.update(|f| {
                                        if let Some(network) = f.social_networks.get_mut(index) {
                                            network.url = value;
                                        }
                                    });
                                }
                            />
                        </div>
                    }
                })
                .collect_view()}

            <h3 class="admin-section__title">"Grupos del Negocio"</h3>
            {move || (0..group_count.get())
                .map(|index| view! { <GroupEditor form=form index=index /> })
                .collect_view()}
            <button type="button" class="button button--secondary" on:click=add_group>
                {icon("plus")}
                "Agregar Grupo"
            </button>

            {move || error.get().map(|e| view! { <div class="warning-box">{e}</div> })}
            {move || notice.get().map(|n| view! { <div class="success-box">{n}</div> })}

            <div class="form-actions">
                <button class="button button--primary" disabled=move || saving.get() on:click=save>
                    {icon("save")}
                    {move || if saving.get() { "Guardando..." } else { "Guardar Configuración" }}
                </button>
            </div>
        </section>
    }
}

#[component]
fn GroupEditor(form: RwSignal<SocialConfig>, index: usize) -> impl IntoView {
    let read = move |f: &SocialConfig| f.business_groups.get(index).cloned().unwrap_or_default();
    let write = move |apply: &dyn Fn(&mut BusinessGroup)| {
        form.update(|f| {
            if let Some(group) = f.business_groups.get_mut(index) {
                apply(group);
            }
        });
    };
    let remove = move |_| {
        form.update(|f| {
            if index < f.business_groups.len() {
                f.business_groups.remove(index);
            }
        });
    };

    view! {
        <div class="group-editor">
            <div class="group-editor__header">
                <h4>{format!("Grupo #{}", index + 1)}</h4>
                <button type="button" class="button button--icon" title="Eliminar" on:click=remove>
                    {icon("trash")}
                </button>
            </div>
            <input
                type="text"
                class="form-input"
                placeholder="Nombre del grupo"
                prop:value=move || form.with(|f| read(f).name)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    write(&|g| g.name = value.clone());
                }
            />
            <input
                type="url"
                class="form-input"
                placeholder="Enlace del grupo"
                prop:value=move || form.with(|f| read(f).link)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    write(&|g| g.link = value.clone());
                }
            />
            <textarea
                class="form-input"
                rows="2"
                placeholder="Descripción del grupo"
                prop:value=move || form.with(|f| read(f).description)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    write(&|g| g.description = value.clone());
                }
            ></textarea>
        </div>
    }
}
