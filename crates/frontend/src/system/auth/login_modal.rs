use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::layout::global_context::use_app_context;
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use crate::system::auth::context::{do_login, use_auth};

/// Окно входа администратора
#[component]
pub fn LoginModal() -> impl IntoView {
    let ctx = use_app_context();
    let (_, set_auth_state) = use_auth();
    let (password, set_password) = signal(String::new());
    let (show_password, set_show_password) = signal(false);
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_loading.get_untracked() {
            return;
        }
        let password_val = password.get_untracked();
        if password_val.is_empty() {
            set_error_message.set(Some("Introduce la contraseña".to_string()));
            return;
        }

        set_is_loading.set(true);
        set_error_message.set(None);

        spawn_local(async move {
            match do_login(password_val, set_auth_state).await {
                Ok(()) => {
                    set_password.set(String::new());
                    ctx.login_open.set(false);
                    ctx.admin_open.set(true);
                }
                Err(e) => {
                    set_error_message.set(Some(e));
                    set_password.set(String::new());
                }
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <Modal
            title="Acceso Administrativo"
            on_close=Callback::new(move |_| ctx.login_open.set(false))
            class="modal--small"
        >
            <form class="login-form" on:submit=on_submit>
                <div class="login-form__icon">{icon("lock")}</div>

                <Show when=move || error_message.get().is_some()>
                    <div class="warning-box">
                        {icon("alert")}
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <div class="form-group">
                    <label for="admin-password">"Contraseña"</label>
                    <div class="password-input">
                        <input
                            type=move || if show_password.get() { "text" } else { "password" }
                            id="admin-password"
                            class="form-input"
                            placeholder="Ingresa la contraseña"
                            autocomplete="current-password"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            disabled=move || is_loading.get()
                        />
                        <button
                            type="button"
                            class="button button--icon password-input__toggle"
                            on:click=move |_| set_show_password.update(|v| *v = !*v)
                        >
                            {move || if show_password.get() { "Ocultar" } else { "Mostrar" }}
                        </button>
                    </div>
                </div>

                <button
                    type="submit"
                    class="button button--primary button--block"
                    disabled=move || is_loading.get()
                >
                    {move || if is_loading.get() { "Verificando..." } else { "Ingresar" }}
                </button>
            </form>
        </Modal>
    }
}
