use contracts::domain::a003_catalog::{CatalogStore, EmptyContext, GalleryState, ViewSelection};
use contracts::domain::a004_site_config::{SocialConfig, LOGO_KEY, SOCIAL_KEY};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::{Deserialize, Serialize};
use web_sys::window;

use crate::domain::{a003_catalog, a004_site_config};

/// Выбранная вкладка в строке адреса (`?categoria=juegos&sub=pc`)
#[derive(Debug, Default, Serialize, Deserialize)]
struct TabQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    categoria: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sub: Option<String>,
}

impl TabQuery {
    fn from_selection(selection: &ViewSelection) -> Self {
        Self {
            categoria: Some(selection.category.clone()),
            sub: selection.subcategory.clone(),
        }
    }

    /// Выбор из адреса; неизвестные ключи игнорируются
    fn into_selection(self) -> Option<ViewSelection> {
        let category = self.categoria?;
        let mut selection = ViewSelection::initial();
        selection.select_category(&category);
        if let Some(sub) = self.sub {
            selection.subcategory = Some(sub);
        }
        selection.placement().ok()?;
        Some(selection)
    }
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    /// `None`, пока каталог не загружен
    pub catalog: RwSignal<Option<CatalogStore>>,
    pub load_error: RwSignal<Option<String>>,
    pub selection: RwSignal<ViewSelection>,
    /// Растёт при каждом выборе вкладки: строка поиска сбрасывается
    pub search_reset: RwSignal<u32>,
    pub logo: RwSignal<String>,
    pub social: RwSignal<SocialConfig>,
    pub admin_open: RwSignal<bool>,
    pub login_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            catalog: RwSignal::new(None),
            load_error: RwSignal::new(None),
            selection: RwSignal::new(ViewSelection::initial()),
            search_reset: RwSignal::new(0),
            logo: RwSignal::new(String::new()),
            social: RwSignal::new(SocialConfig::default()),
            admin_open: RwSignal::new(false),
            login_open: RwSignal::new(false),
        }
    }

    /// Загрузить каталог с сервера
    pub fn reload_catalog(&self) {
        let catalog = self.catalog;
        let load_error = self.load_error;
        spawn_local(async move {
            match a003_catalog::api::fetch_catalog().await {
                Ok(store) => {
                    load_error.set(None);
                    catalog.set(Some(store));
                }
                Err(e) => {
                    log::error!("Failed to load catalog: {}", e);
                    load_error.set(Some(e));
                    catalog.update(|c| {
                        if c.is_none() {
                            *c = Some(CatalogStore::empty());
                        }
                    });
                }
            }
        });
    }

    /// Логотип и соцсети для шапки и подвала
    pub fn load_site_config(&self) {
        let logo = self.logo;
        let social = self.social;
        spawn_local(async move {
            match a004_site_config::api::fetch_entry(LOGO_KEY).await {
                Ok(entry) => logo.set(entry.value),
                Err(e) => log::warn!("Failed to load logo: {}", e),
            }
            match a004_site_config::api::fetch_entry(SOCIAL_KEY).await {
                Ok(entry) => match SocialConfig::from_entry(&entry) {
                    Ok(config) => social.set(config),
                    Err(e) => log::warn!("Invalid social config: {}", e),
                },
                Err(e) => log::warn!("Failed to load social config: {}", e),
            }
        });
    }

    /// Состояние галереи для текущего выбора
    pub fn gallery(&self) -> GalleryState {
        let selection = self.selection.get();
        self.catalog.with(|catalog| match catalog {
            None => GalleryState::Loading,
            Some(store) => selection
                .gallery(store)
                .unwrap_or(GalleryState::Empty(EmptyContext::EmptyCategory)),
        })
    }

    pub fn select_category(&self, key: &str) {
        self.selection.update(|s| {
            s.select_category(key);
            s.query.clear();
        });
        self.search_reset.update(|n| *n = n.wrapping_add(1));
    }

    pub fn select_subcategory(&self, key: &str) {
        self.selection
            .update(|s| s.subcategory = Some(key.to_string()));
    }

    pub fn set_query(&self, query: String) {
        self.selection.update(|s| s.query = query);
    }

    /// Кнопка Admin: панель, если вход уже выполнен, иначе окно входа
    pub fn open_admin(&self, is_admin: bool) {
        if is_admin {
            self.admin_open.set(true);
        } else {
            self.login_open.set(true);
        }
    }

    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let query: TabQuery = serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        if let Some(selection) = query.into_selection() {
            self.selection.set(selection);
        }

        let selection = self.selection;
        Effect::new(move |_| {
            let query = selection.with(TabQuery::from_selection);
            let new_url = format!("?{}", serde_qs::to_string(&query).unwrap_or_default());

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();

            // Only update URL if it actually changed
            if current_search != new_url {
                if let Some(w) = window() {
                    if let Ok(history) = w.history() {
                        let _ = history.replace_state_with_url(
                            &wasm_bindgen::JsValue::NULL,
                            "",
                            Some(&new_url),
                        );
                    }
                }
            }
        });
    }
}

pub fn use_app_context() -> AppGlobalContext {
    expect_context::<AppGlobalContext>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_query_round_trip() {
        let mut selection = ViewSelection::initial();
        selection.select_category("aplicaciones");
        let qs = serde_qs::to_string(&TabQuery::from_selection(&selection)).unwrap();
        assert_eq!(qs, "categoria=aplicaciones&sub=apple");

        let back: TabQuery = serde_qs::from_str(&qs).unwrap();
        assert_eq!(back.into_selection(), Some(selection));
    }

    #[test]
    fn test_unknown_tab_in_address_is_ignored() {
        let query: TabQuery = serde_qs::from_str("categoria=podcasts").unwrap();
        assert_eq!(query.into_selection(), None);

        let query: TabQuery = serde_qs::from_str("categoria=juegos&sub=ps5").unwrap();
        assert_eq!(query.into_selection(), None);
    }

    #[test]
    fn test_reselecting_active_tab_resets_search() {
        let owner = Owner::new();
        owner.set();
        let ctx = AppGlobalContext::new();
        ctx.set_query("halo".into());

        let category = ctx.selection.get_untracked().category;
        ctx.select_category(&category);
        assert_eq!(ctx.search_reset.get_untracked(), 1);
        assert!(ctx.selection.get_untracked().query.is_empty());

        ctx.select_category(&category);
        assert_eq!(ctx.search_reset.get_untracked(), 2);
    }
}
