//! Демонстрационный каталог: 18 товаров по всем категориям.
//!
//! Используется для первичного наполнения БД и в тестах.

use super::store::CatalogStore;

const FIXTURE_JSON: &str = include_str!("fixtures.json");

/// Разобрать встроенный демо-каталог
pub fn fixture_catalog() -> Result<CatalogStore, serde_json::Error> {
    serde_json::from_str(FIXTURE_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_catalog_is_complete() {
        let store = fixture_catalog().unwrap();
        assert_eq!(store.len(), 18);
        assert_eq!(store.products_in("juegos", Some("pc")).unwrap().len(), 3);
        assert_eq!(store.products_in("aplicaciones", Some("android")).unwrap().len(), 1);
        assert_eq!(store.products_in("animes", None).unwrap()[1].titulo, "Demon Slayer");
    }

    #[test]
    fn test_only_games_and_apps_carry_platforms() {
        let store = fixture_catalog().unwrap();
        for entry in store.entries() {
            let has_tags = entry.product.platform_tags().is_some();
            assert_eq!(has_tags, entry.placement.offers_platforms(), "{}", entry.product.titulo);
        }
    }
}
