use serde::Serialize;

use crate::domain::common::CatalogError;

/// Подкатегория (вкладка второго уровня)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubcategoryDef {
    pub key: &'static str,
    pub label: &'static str,
}

/// Запись индекса категорий.
///
/// `subcategories` либо `None` (товары лежат плоским списком), либо
/// непустой срез; пустой срез недопустим.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryDef {
    pub key: &'static str,
    pub label: &'static str,
    pub subcategories: Option<&'static [SubcategoryDef]>,
    /// Поле "Plataformas" предлагается только для игр и приложений
    #[serde(rename = "offersPlatforms")]
    pub offers_platforms: bool,
}

impl CategoryDef {
    pub fn is_grouped(&self) -> bool {
        self.subcategories.is_some()
    }

    pub fn subcategory(&self, key: &str) -> Option<&'static SubcategoryDef> {
        self.subcategories?.iter().find(|s| s.key == key)
    }
}

const GAMES_SUBCATEGORIES: &[SubcategoryDef] = &[
    SubcategoryDef { key: "pc", label: "PC" },
    SubcategoryDef { key: "xboxOne", label: "Xbox One" },
    SubcategoryDef { key: "xboxSeries", label: "Xbox Series S/X" },
];

const APPS_SUBCATEGORIES: &[SubcategoryDef] = &[
    SubcategoryDef { key: "apple", label: "Apple" },
    SubcategoryDef { key: "android", label: "Android" },
];

const fn flat(key: &'static str, label: &'static str) -> CategoryDef {
    CategoryDef {
        key,
        label,
        subcategories: None,
        offers_platforms: false,
    }
}

/// Статический индекс категорий. Порядок элементов задаёт порядок вкладок
/// и порядок "уплощения" каталога для поиска.
pub const CATEGORY_INDEX: &[CategoryDef] = &[
    CategoryDef {
        key: "juegos",
        label: "Juegos",
        subcategories: Some(GAMES_SUBCATEGORIES),
        offers_platforms: true,
    },
    CategoryDef {
        key: "aplicaciones",
        label: "Aplicaciones",
        subcategories: Some(APPS_SUBCATEGORIES),
        offers_platforms: true,
    },
    flat("seriesTV", "Series TV"),
    flat("telenovelas", "Telenovelas"),
    flat("peliculas", "Películas"),
    flat("realitys", "Realitys"),
    flat("animados", "Animados"),
    flat("animes", "Animes"),
];

/// Все категории в порядке индекса
pub fn categories() -> impl Iterator<Item = &'static CategoryDef> {
    CATEGORY_INDEX.iter()
}

fn find(category_key: &str) -> Result<&'static CategoryDef, CatalogError> {
    CATEGORY_INDEX
        .iter()
        .find(|c| c.key == category_key)
        .ok_or_else(|| CatalogError::category_not_found(category_key))
}

/// Подпись вкладки для категории
pub fn label_for(category_key: &str) -> Result<&'static str, CatalogError> {
    find(category_key).map(|c| c.label)
}

/// Подкатегории категории: `Ok(None)` для плоских категорий
pub fn subcategories_of(
    category_key: &str,
) -> Result<Option<&'static [SubcategoryDef]>, CatalogError> {
    find(category_key).map(|c| c.subcategories)
}

pub fn subcategory_label(category_key: &str, sub_key: &str) -> Result<&'static str, CatalogError> {
    find(category_key)?
        .subcategory(sub_key)
        .map(|s| s.label)
        .ok_or_else(|| CatalogError::subcategory_not_found(category_key, sub_key))
}

pub fn requires_subcategory(category_key: &str) -> Result<bool, CatalogError> {
    find(category_key).map(|c| c.is_grouped())
}

pub fn offers_platforms(category_key: &str) -> Result<bool, CatalogError> {
    find(category_key).map(|c| c.offers_platforms)
}
