//! Поиск по каталогу: подстрока без учёта регистра по названию и описанию.

use crate::domain::a001_product::Product;

use super::store::CatalogEntry;

/// Типы, по которым работает поиск каталога
pub trait Searchable {
    /// Проверяет, соответствует ли объект запросу (запрос уже в нижнем регистре)
    fn matches_filter(&self, needle: &str) -> bool;
}

impl Searchable for Product {
    fn matches_filter(&self, needle: &str) -> bool {
        self.searchable_text()
            .iter()
            .any(|text| text.to_lowercase().contains(needle))
    }
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn matches_filter(&self, needle: &str) -> bool {
        (**self).matches_filter(needle)
    }
}

impl Searchable for CatalogEntry {
    fn matches_filter(&self, needle: &str) -> bool {
        self.product.matches_filter(needle)
    }
}

/// Нормализованный запрос: `None`, если после обрезки пробелов он пуст
pub fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

/// Отфильтровать элементы по запросу с сохранением порядка.
///
/// Пустой запрос возвращает все элементы.
pub fn filter<T, I>(query: &str, items: I) -> Vec<T>
where
    T: Searchable,
    I: IntoIterator<Item = T>,
{
    match normalize_query(query) {
        None => items.into_iter().collect(),
        Some(needle) => items
            .into_iter()
            .filter(|item| item.matches_filter(&needle))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_catalog::fixtures::fixture_catalog;
    use proptest::prelude::*;

    fn titles(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.titulo.clone()).collect()
    }

    #[test]
    fn test_witcher_query_finds_single_game() {
        let store = fixture_catalog().unwrap();
        let hits = filter("witcher", store.flatten());
        assert_eq!(titles(&hits), vec!["The Witcher 3"]);
    }

    #[test]
    fn test_query_matches_description_case_insensitive() {
        let store = fixture_catalog().unwrap();
        let hits = filter("  MARVEL ", store.flatten());
        assert_eq!(titles(&hits), vec!["Avengers: Endgame"]);

        let hits = filter("japón", store.flatten());
        assert_eq!(titles(&hits), vec!["Demon Slayer"]);
    }

    #[test]
    fn test_blank_query_returns_everything_in_order() {
        let store = fixture_catalog().unwrap();
        let all = store.flatten();
        assert_eq!(filter("   ", all.clone()), all);
    }

    #[test]
    fn test_entries_are_searchable() {
        let store = fixture_catalog().unwrap();
        let hits = filter("whatsapp", store.entries());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].placement.subcategory(), Some("android"));
    }

    proptest! {
        #[test]
        fn prop_filter_keeps_order_subsequence(query in "[a-zA-Z ]{0,6}") {
            let store = fixture_catalog().unwrap();
            let all = store.flatten();
            let hits = filter(&query, all.clone());
            let mut rest = all.iter();
            for hit in &hits {
                prop_assert!(rest.any(|p| p.id == hit.id));
            }
        }

        #[test]
        fn prop_filter_is_idempotent(query in "[a-zñé ]{0,5}") {
            let store = fixture_catalog().unwrap();
            let once = filter(&query, store.flatten());
            let twice = filter(&query, once.clone());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_whitespace_only_query_is_identity(spaces in "[ \t]{0,4}") {
            let store = fixture_catalog().unwrap();
            let all = store.flatten();
            prop_assert_eq!(filter(&spaces, all.clone()), all);
        }
    }
}
