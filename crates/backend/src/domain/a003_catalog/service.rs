use contracts::domain::a002_category::{label_for, Placement};
use contracts::domain::a003_catalog::{filter, CatalogEntry, CatalogStore};
use contracts::domain::common::CatalogError;
use serde::Deserialize;

use crate::domain::a001_product;

/// Параметры GET /api/products
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    pub categoria: Option<String>,
    pub subcategoria: Option<String>,
    pub search: Option<String>,
}

/// Каталог целиком, в форме категория -> полка
pub async fn load_catalog() -> anyhow::Result<CatalogStore> {
    let entries = a001_product::service::list_all().await?;
    Ok(CatalogStore::from_entries(entries)?)
}

/// Уплощённый список товаров с фильтрами
pub async fn query_products(query: &ProductQuery) -> anyhow::Result<Vec<CatalogEntry>> {
    let store = load_catalog().await?;
    Ok(select(&store, query)?)
}

/// Сузить каталог по категории/подкатегории и применить поиск.
///
/// Порядок результата совпадает с порядком уплощения каталога.
pub fn select(store: &CatalogStore, query: &ProductQuery) -> Result<Vec<CatalogEntry>, CatalogError> {
    let category = non_blank(query.categoria.as_deref());
    let mut subcategory = non_blank(query.subcategoria.as_deref()).map(str::to_string);

    if let Some(category) = category {
        label_for(category)?;
        if let Some(sub) = subcategory.take() {
            // Для плоской категории подкатегория отбрасывается
            subcategory = Placement::resolve(category, Some(&sub))?
                .subcategory()
                .map(str::to_string);
        }
    }

    let narrowed = store.entries().into_iter().filter(|entry| {
        category.map_or(true, |c| entry.placement.category() == c)
            && subcategory
                .as_deref()
                .map_or(true, |s| entry.placement.subcategory() == Some(s))
    });
    Ok(filter(query.search.as_deref().unwrap_or_default(), narrowed))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a003_catalog::fixture_catalog;

    fn query(categoria: Option<&str>, subcategoria: Option<&str>, search: Option<&str>) -> ProductQuery {
        ProductQuery {
            categoria: categoria.map(Into::into),
            subcategoria: subcategoria.map(Into::into),
            search: search.map(Into::into),
        }
    }

    fn titles(entries: &[CatalogEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.product.titulo.as_str()).collect()
    }

    #[test]
    fn test_no_filters_returns_flattened_catalog() {
        let store = fixture_catalog().unwrap();
        let all = select(&store, &ProductQuery::default()).unwrap();
        assert_eq!(all.len(), 18);
        assert_eq!(all[0].product.titulo, "Cyberpunk 2077");
        assert_eq!(all[17].product.titulo, "Demon Slayer");
    }

    #[test]
    fn test_category_and_search_combine() {
        let store = fixture_catalog().unwrap();
        let hits = select(&store, &query(Some("juegos"), None, Some("mundo"))).unwrap();
        assert_eq!(
            titles(&hits),
            vec!["The Witcher 3", "Forza Horizon 5", "Microsoft Flight Simulator"]
        );

        let hits = select(&store, &query(Some("juegos"), Some("xboxOne"), None)).unwrap();
        assert_eq!(titles(&hits), vec!["Halo Infinite", "Forza Horizon 5"]);
    }

    #[test]
    fn test_unknown_keys_are_not_found() {
        let store = fixture_catalog().unwrap();
        assert!(select(&store, &query(Some("podcasts"), None, None))
            .unwrap_err()
            .is_not_found());
        assert!(select(&store, &query(Some("juegos"), Some("ps5"), None))
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_flat_category_ignores_subcategory() {
        let store = fixture_catalog().unwrap();
        let plain = select(&store, &query(Some("peliculas"), None, None)).unwrap();
        let with_sub = select(&store, &query(Some("peliculas"), Some("pc"), None)).unwrap();
        assert_eq!(plain.len(), 2);
        assert_eq!(titles(&with_sub), titles(&plain));
        assert_eq!(
            plain.len(),
            store.products_in("peliculas", Some("pc")).unwrap().len()
        );
    }

    #[test]
    fn test_blank_parameters_are_ignored() {
        let store = fixture_catalog().unwrap();
        let all = select(&store, &query(Some(" "), Some(""), Some("  "))).unwrap();
        assert_eq!(all.len(), 18);
    }
}
