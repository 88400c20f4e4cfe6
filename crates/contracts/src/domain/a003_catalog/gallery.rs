//! Контракт отображения галереи: что показать для набора товаров.
//!
//! Разметка живёт во frontend; здесь только решение "загрузка / пусто / карточки"
//! и данные карточки.

use serde::{Deserialize, Serialize};

use crate::domain::a001_product::{format_release_date, Product, ProductId};
use crate::domain::a002_category::{categories, Placement};
use crate::domain::common::CatalogError;

use super::search::{filter, normalize_query};
use super::store::CatalogStore;

/// Откуда взялся пустой набор: от этого зависит сообщение
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmptyContext {
    /// Поиск ничего не нашёл
    NoSearchResults,
    /// В выбранной вкладке нет товаров
    EmptyCategory,
}

impl EmptyContext {
    pub fn message(&self) -> &'static str {
        match self {
            EmptyContext::NoSearchResults => "No se encontraron productos",
            EmptyContext::EmptyCategory => "No hay productos disponibles en esta categoría",
        }
    }

    pub fn hint(&self) -> Option<&'static str> {
        match self {
            EmptyContext::NoSearchResults => Some("Intenta con otros términos de búsqueda"),
            EmptyContext::EmptyCategory => None,
        }
    }
}

/// Данные одной карточки товара
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductCard {
    pub id: ProductId,
    pub titulo: String,
    pub descripcion: String,
    pub pais: String,
    /// Дата в длинной испанской форме
    pub fecha: String,
    /// Изображение или заглушка
    pub imagen: String,
    /// `None`, если платформ нет: список не рендерится вовсе
    pub plataformas: Option<Vec<String>>,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            titulo: product.titulo.clone(),
            descripcion: product.descripcion.clone(),
            pais: product.pais.clone(),
            fecha: format_release_date(product.fecha_lanzamiento),
            imagen: product.image_or_placeholder().to_string(),
            plataformas: product.platform_tags().map(<[String]>::to_vec),
        }
    }
}

/// Состояние галереи
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryState {
    Loading,
    Empty(EmptyContext),
    Cards(Vec<ProductCard>),
}

impl GalleryState {
    pub fn from_products<'a, I>(products: I, context: EmptyContext) -> Self
    where
        I: IntoIterator<Item = &'a Product>,
    {
        let cards: Vec<ProductCard> = products.into_iter().map(ProductCard::from).collect();
        if cards.is_empty() {
            GalleryState::Empty(context)
        } else {
            GalleryState::Cards(cards)
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, GalleryState::Loading)
    }
}

/// Что выбрал пользователь: вкладка, подвкладка и строка поиска.
///
/// Активный поиск заменяет вид категории результатами по всему каталогу.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewSelection {
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub query: String,
}

impl ViewSelection {
    /// Первая вкладка индекса и её первая подвкладка
    pub fn initial() -> Self {
        let mut selection = Self::default();
        if let Some(first) = categories().next() {
            selection.select_category(first.key);
        }
        selection
    }

    /// Выбрать вкладку; для сгруппированной категории открывается первая подвкладка
    pub fn select_category(&mut self, category: &str) {
        self.category = category.to_string();
        self.subcategory = categories()
            .find(|c| c.key == category)
            .and_then(|c| c.subcategories)
            .and_then(|subs| subs.first())
            .map(|s| s.key.to_string());
    }

    pub fn is_searching(&self) -> bool {
        normalize_query(&self.query).is_some()
    }

    /// Место выбранной вкладки в каталоге
    pub fn placement(&self) -> Result<Placement, CatalogError> {
        Placement::resolve(&self.category, self.subcategory.as_deref())
    }

    /// Состояние галереи для текущего выбора
    pub fn gallery(&self, store: &CatalogStore) -> Result<GalleryState, CatalogError> {
        if self.is_searching() {
            let hits = filter(&self.query, store.flatten());
            return Ok(GalleryState::from_products(hits, EmptyContext::NoSearchResults));
        }
        let placement = self.placement()?;
        let products = store.products_in(placement.category(), placement.subcategory())?;
        Ok(GalleryState::from_products(products, EmptyContext::EmptyCategory))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_catalog::fixtures::fixture_catalog;

    fn card_titles(state: &GalleryState) -> Vec<&str> {
        match state {
            GalleryState::Cards(cards) => cards.iter().map(|c| c.titulo.as_str()).collect(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn test_no_match_query_shows_no_results_indicator() {
        let store = fixture_catalog().unwrap();
        let selection = ViewSelection {
            query: "zzz-no-match".into(),
            ..ViewSelection::initial()
        };
        let state = selection.gallery(&store).unwrap();
        assert_eq!(state, GalleryState::Empty(EmptyContext::NoSearchResults));
        assert_ne!(state, GalleryState::Empty(EmptyContext::EmptyCategory));
        assert!(!state.is_loading());
    }

    #[test]
    fn test_series_tv_renders_flat_list() {
        let store = fixture_catalog().unwrap();
        let mut selection = ViewSelection::initial();
        selection.select_category("seriesTV");
        assert_eq!(selection.subcategory, None);

        let state = selection.gallery(&store).unwrap();
        assert_eq!(card_titles(&state), vec!["Stranger Things", "The Mandalorian"]);
    }

    #[test]
    fn test_initial_selection_opens_first_subcategory() {
        let store = fixture_catalog().unwrap();
        let selection = ViewSelection::initial();
        assert_eq!(selection.category, "juegos");
        assert_eq!(selection.subcategory.as_deref(), Some("pc"));
        let state = selection.gallery(&store).unwrap();
        assert_eq!(card_titles(&state).len(), 3);
    }

    #[test]
    fn test_search_replaces_category_view() {
        let store = fixture_catalog().unwrap();
        let mut selection = ViewSelection::initial();
        selection.select_category("animes");
        selection.query = "witcher".into();
        let state = selection.gallery(&store).unwrap();
        assert_eq!(card_titles(&state), vec!["The Witcher 3"]);
    }

    #[test]
    fn test_empty_shelf_uses_category_context() {
        let mut store = fixture_catalog().unwrap();
        store.remove(&ProductId::new("9")).unwrap();
        let mut selection = ViewSelection::initial();
        selection.select_category("aplicaciones");
        selection.subcategory = Some("android".into());
        let state = selection.gallery(&store).unwrap();
        assert_eq!(state, GalleryState::Empty(EmptyContext::EmptyCategory));
    }

    #[test]
    fn test_card_formats_date_and_omits_missing_platforms() {
        let store = fixture_catalog().unwrap();
        let (_, cyberpunk) = store.find(&ProductId::new("1")).unwrap();
        let card = ProductCard::from(cyberpunk);
        assert_eq!(card.fecha, "10 de diciembre de 2020");
        assert_eq!(card.plataformas.map(|p| p.len()), Some(3));

        let (_, survivor) = store.find(&ProductId::new("15")).unwrap();
        let card = ProductCard::from(survivor);
        assert_eq!(card.plataformas, None);
    }

    #[test]
    fn test_unknown_category_is_not_found() {
        let store = fixture_catalog().unwrap();
        let mut selection = ViewSelection::initial();
        selection.select_category("podcasts");
        assert!(selection.gallery(&store).unwrap_err().is_not_found());
    }
}
