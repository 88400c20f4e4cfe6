use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::domain::a001_product::{Product, ProductId};
use crate::domain::a002_category::{categories, CategoryDef, Placement};
use crate::domain::common::CatalogError;

/// Полка категории: плоский список или товары по подкатегориям.
///
/// Форма полки всегда совпадает с формой записи в индексе категорий.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Shelf {
    Flat(Vec<Product>),
    Grouped(BTreeMap<String, Vec<Product>>),
}

impl Shelf {
    fn empty_for(def: &CategoryDef) -> Self {
        match def.subcategories {
            None => Shelf::Flat(Vec::new()),
            Some(subs) => Shelf::Grouped(
                subs.iter()
                    .map(|s| (s.key.to_string(), Vec::new()))
                    .collect(),
            ),
        }
    }

    fn len(&self) -> usize {
        match self {
            Shelf::Flat(items) => items.len(),
            Shelf::Grouped(groups) => groups.values().map(Vec::len).sum(),
        }
    }
}

/// Товар вместе с местом в каталоге (строка плоского списка /api/products)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(flatten)]
    pub placement: Placement,
    #[serde(flatten)]
    pub product: Product,
}

/// Хранилище каталога: категория -> полка.
///
/// Инвариант: id товара уникален во всём каталоге, независимо от полки.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, Shelf>", into = "BTreeMap<String, Shelf>")]
pub struct CatalogStore {
    shelves: BTreeMap<String, Shelf>,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::empty()
    }
}

impl CatalogStore {
    /// Пустой каталог: по полке на каждую категорию индекса
    pub fn empty() -> Self {
        Self {
            shelves: categories()
                .map(|def| (def.key.to_string(), Shelf::empty_for(def)))
                .collect(),
        }
    }

    /// Собрать каталог из записей (например, строк БД)
    pub fn from_entries<I>(entries: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = CatalogEntry>,
    {
        let mut store = Self::empty();
        for entry in entries {
            store.insert(entry.placement, entry.product)?;
        }
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.shelves.values().map(Shelf::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn shelf(&self, category: &str) -> Result<&Shelf, CatalogError> {
        self.shelves
            .get(category)
            .ok_or_else(|| CatalogError::category_not_found(category))
    }

    /// Товары одной вкладки. Для сгруппированной категории нужна подкатегория,
    /// для плоской подкатегория не учитывается.
    pub fn products_in(
        &self,
        category: &str,
        subcategory: Option<&str>,
    ) -> Result<&[Product], CatalogError> {
        match self.shelf(category)? {
            Shelf::Flat(items) => Ok(items),
            Shelf::Grouped(groups) => {
                let sub = subcategory.unwrap_or_default();
                groups
                    .get(sub)
                    .map(Vec::as_slice)
                    .ok_or_else(|| CatalogError::subcategory_not_found(category, sub))
            }
        }
    }

    /// Уплощение: порядок категорий индекса, затем порядок подкатегорий,
    /// затем порядок списка.
    pub fn flatten(&self) -> Vec<&Product> {
        self.walk().map(|(_, product)| product).collect()
    }

    /// То же уплощение, но с местом каждого товара
    pub fn entries(&self) -> Vec<CatalogEntry> {
        self.walk()
            .map(|(placement, product)| CatalogEntry {
                placement,
                product: product.clone(),
            })
            .collect()
    }

    fn walk(&self) -> impl Iterator<Item = (Placement, &Product)> + '_ {
        categories().flat_map(move |def| {
            let mut items = Vec::new();
            match self.shelves.get(def.key) {
                Some(Shelf::Flat(list)) => {
                    if let Ok(placement) = Placement::resolve(def.key, None) {
                        items.extend(list.iter().map(|p| (placement.clone(), p)));
                    }
                }
                Some(Shelf::Grouped(groups)) => {
                    for sub in def.subcategories.unwrap_or_default() {
                        let placement = Placement::resolve(def.key, Some(sub.key));
                        if let (Ok(placement), Some(list)) = (placement, groups.get(sub.key)) {
                            items.extend(list.iter().map(|p| (placement.clone(), p)));
                        }
                    }
                }
                None => {}
            }
            items
        })
    }

    pub fn find(&self, id: &ProductId) -> Option<(Placement, &Product)> {
        self.walk().find(|(_, p)| &p.id == id)
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.find(id).is_some()
    }

    fn list_mut(&mut self, placement: &Placement) -> Result<&mut Vec<Product>, CatalogError> {
        let category = placement.category();
        match self.shelves.get_mut(category) {
            Some(Shelf::Flat(items)) => Ok(items),
            Some(Shelf::Grouped(groups)) => {
                let sub = placement.subcategory().unwrap_or_default();
                groups
                    .get_mut(sub)
                    .ok_or_else(|| CatalogError::subcategory_not_found(category, sub))
            }
            None => Err(CatalogError::category_not_found(category)),
        }
    }

    /// Добавить товар в конец полки
    pub fn insert(&mut self, placement: Placement, product: Product) -> Result<(), CatalogError> {
        if self.contains(&product.id) {
            return Err(CatalogError::DuplicateId(product.id.to_string()));
        }
        self.list_mut(&placement)?.push(product);
        Ok(())
    }

    /// Заменить товар. Если место не менялось, позиция в списке сохраняется,
    /// иначе товар переносится в конец новой полки.
    pub fn replace(&mut self, placement: Placement, product: Product) -> Result<(), CatalogError> {
        let (current, _) = self
            .find(&product.id)
            .ok_or_else(|| CatalogError::product_not_found(product.id.as_str()))?;
        if current == placement {
            let list = self.list_mut(&placement)?;
            if let Some(slot) = list.iter_mut().find(|p| p.id == product.id) {
                *slot = product;
            }
            return Ok(());
        }
        // Проверяем новое место до удаления, чтобы не потерять товар
        self.list_mut(&placement)?;
        self.remove(&product.id)?;
        self.list_mut(&placement)?.push(product);
        Ok(())
    }

    pub fn remove(&mut self, id: &ProductId) -> Result<(Placement, Product), CatalogError> {
        let (placement, _) = self
            .find(id)
            .ok_or_else(|| CatalogError::product_not_found(id.as_str()))?;
        let list = self.list_mut(&placement)?;
        let index = list
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| CatalogError::product_not_found(id.as_str()))?;
        Ok((placement, list.remove(index)))
    }
}

impl TryFrom<BTreeMap<String, Shelf>> for CatalogStore {
    type Error = CatalogError;

    fn try_from(shelves: BTreeMap<String, Shelf>) -> Result<Self, Self::Error> {
        let mut store = Self::empty();
        let mut seen = HashSet::new();
        for (category, shelf) in shelves {
            let def = categories()
                .find(|c| c.key == category)
                .ok_or_else(|| CatalogError::category_not_found(&category))?;
            let groups: Vec<(Option<String>, Vec<Product>)> = match (shelf, def.subcategories) {
                (Shelf::Flat(items), None) => vec![(None, items)],
                // пустой массив для сгруппированной категории = нет товаров
                (Shelf::Flat(items), Some(_)) if items.is_empty() => Vec::new(),
                (Shelf::Flat(_), Some(_)) => {
                    return Err(CatalogError::subcategory_not_found(&category, ""))
                }
                (Shelf::Grouped(map), Some(_)) => {
                    map.into_iter().map(|(sub, items)| (Some(sub), items)).collect()
                }
                (Shelf::Grouped(map), None) => {
                    let sub = map.keys().next().cloned().unwrap_or_default();
                    return Err(CatalogError::subcategory_not_found(&category, &sub));
                }
            };
            for (sub, items) in groups {
                let placement = Placement::resolve(&category, sub.as_deref())?;
                for product in items {
                    if !seen.insert(product.id.clone()) {
                        return Err(CatalogError::DuplicateId(product.id.to_string()));
                    }
                    store.list_mut(&placement)?.push(product);
                }
            }
        }
        Ok(store)
    }
}

impl From<CatalogStore> for BTreeMap<String, Shelf> {
    fn from(store: CatalogStore) -> Self {
        store.shelves
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_catalog::fixtures::fixture_catalog;

    fn titles(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.titulo.clone()).collect()
    }

    #[test]
    fn test_flatten_follows_index_order() {
        let store = fixture_catalog().unwrap();
        let flat = store.flatten();
        assert_eq!(flat.len(), 18);
        let ids: Vec<&str> = flat.iter().map(|p| p.id.as_str()).collect();
        let expected: Vec<String> = (1..=18).map(|n| n.to_string()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_products_in_flat_and_grouped() {
        let store = fixture_catalog().unwrap();
        let series = store.products_in("seriesTV", None).unwrap();
        assert_eq!(series.len(), 2);

        let xbox = store.products_in("juegos", Some("xboxOne")).unwrap();
        assert_eq!(xbox[0].titulo, "Halo Infinite");

        assert!(store.products_in("juegos", None).unwrap_err().is_not_found());
        assert!(store.products_in("podcasts", None).unwrap_err().is_not_found());
    }

    #[test]
    fn test_insert_rejects_duplicate_id_across_shelves() {
        let mut store = fixture_catalog().unwrap();
        let (_, witcher) = store.find(&ProductId::new("2")).unwrap();
        let copy = witcher.clone();
        let placement = Placement::resolve("peliculas", None).unwrap();
        assert_eq!(
            store.insert(placement, copy),
            Err(CatalogError::DuplicateId("2".into()))
        );
    }

    #[test]
    fn test_replace_moves_between_shelves() {
        let mut store = fixture_catalog().unwrap();
        let (_, p) = store.find(&ProductId::new("13")).unwrap();
        let mut endgame = p.clone();
        endgame.titulo = "Avengers: Endgame (IMAX)".into();

        let animados = Placement::resolve("animados", None).unwrap();
        store.replace(animados.clone(), endgame).unwrap();

        let (placement, moved) = store.find(&ProductId::new("13")).unwrap();
        assert_eq!(placement, animados);
        assert_eq!(moved.titulo, "Avengers: Endgame (IMAX)");
        assert_eq!(store.products_in("peliculas", None).unwrap().len(), 1);
        assert_eq!(store.len(), 18);
    }

    #[test]
    fn test_remove_has_no_cascade() {
        let mut store = fixture_catalog().unwrap();
        let (placement, removed) = store.remove(&ProductId::new("9")).unwrap();
        assert_eq!(placement.subcategory(), Some("android"));
        assert_eq!(removed.titulo, "WhatsApp");
        assert_eq!(store.len(), 17);
        assert!(store.products_in("aplicaciones", Some("android")).unwrap().is_empty());
        assert!(store.remove(&ProductId::new("9")).unwrap_err().is_not_found());
    }

    #[test]
    fn test_wire_shape_round_trip() {
        let store = fixture_catalog().unwrap();
        let value = serde_json::to_value(&store).unwrap();
        assert!(value["seriesTV"].is_array());
        assert!(value["juegos"]["pc"].is_array());
        let again: CatalogStore = serde_json::from_value(value).unwrap();
        assert_eq!(again, store);
        assert_eq!(titles(&again.flatten()), titles(&store.flatten()));
    }

    #[test]
    fn test_wire_shape_mismatch_rejected() {
        let flat_for_grouped = r#"{"juegos":[{"id":1,"titulo":"X","fechaLanzamiento":"2020-01-01"}]}"#;
        assert!(serde_json::from_str::<CatalogStore>(flat_for_grouped).is_err());

        let grouped_for_flat = r#"{"animes":{"pc":[]}}"#;
        assert!(serde_json::from_str::<CatalogStore>(grouped_for_flat).is_err());

        let duplicate = r#"{
            "animes":[{"id":1,"titulo":"A","fechaLanzamiento":"2020-01-01"}],
            "realitys":[{"id":1,"titulo":"B","fechaLanzamiento":"2020-01-01"}]
        }"#;
        assert!(serde_json::from_str::<CatalogStore>(duplicate).is_err());
    }

    #[test]
    fn test_entries_carry_placement() {
        let store = fixture_catalog().unwrap();
        let entries = store.entries();
        let json = serde_json::to_value(&entries[0]).unwrap();
        assert_eq!(json["categoria"], "juegos");
        assert_eq!(json["subcategoria"], "pc");
        assert_eq!(json["titulo"], "Cyberpunk 2077");
        let back: CatalogEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entries[0]);
    }
}
