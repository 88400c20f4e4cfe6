use leptos::prelude::*;

use super::{api, storage};
use crate::shared::api_utils::SESSION_EXPIRED;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub access_token: Option<String>,
}

impl AuthState {
    pub fn is_admin(&self) -> bool {
        self.access_token.is_some()
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    // Сессия восстанавливается из localStorage; срок токена проверит сервер
    let (auth_state, set_auth_state) = signal(AuthState {
        access_token: storage::get_access_token(),
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    (
        expect_context::<ReadSignal<AuthState>>(),
        expect_context::<WriteSignal<AuthState>>(),
    )
}

/// Текущий токен администратора без подписки на изменения
pub fn current_token(auth_state: ReadSignal<AuthState>) -> Result<String, String> {
    auth_state
        .with_untracked(|s| s.access_token.clone())
        .ok_or_else(|| SESSION_EXPIRED.to_string())
}

/// Сбросить сессию, если сервер ответил 401
pub fn forget_expired_session(message: &str, set_auth_state: WriteSignal<AuthState>) {
    if message == SESSION_EXPIRED {
        do_logout(set_auth_state);
    }
}

/// Helper: Perform login
pub async fn do_login(
    password: String,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), String> {
    let response = api::login(password).await?;
    storage::save_access_token(&response.access_token);
    set_auth_state.set(AuthState {
        access_token: Some(response.access_token),
    });
    Ok(())
}

/// Helper: Perform logout
pub fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    storage::clear_tokens();
    set_auth_state.set(AuthState::default());
}
