use serde::{Deserialize, Serialize};

use super::index::{categories, CategoryDef};
use crate::domain::common::CatalogError;

/// Место товара в каталоге: категория и (для сгруппированных) подкатегория.
///
/// Создаётся только через [`Placement::resolve`], поэтому пара всегда
/// согласована с индексом категорий.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPlacement")]
pub struct Placement {
    #[serde(rename = "categoria")]
    category: String,
    #[serde(rename = "subcategoria", default, skip_serializing_if = "Option::is_none")]
    subcategory: Option<String>,
}

impl Placement {
    /// Проверить пару категория/подкатегория по индексу.
    ///
    /// Для плоских категорий переданная подкатегория игнорируется.
    pub fn resolve(category: &str, subcategory: Option<&str>) -> Result<Self, CatalogError> {
        let def = category_def(category)?;
        let subcategory = match def.subcategories {
            None => None,
            Some(_) => {
                let sub = subcategory
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .ok_or_else(|| CatalogError::subcategory_not_found(category, ""))?;
                def.subcategory(sub)
                    .ok_or_else(|| CatalogError::subcategory_not_found(category, sub))?;
                Some(sub.to_string())
            }
        };
        Ok(Self {
            category: def.key.to_string(),
            subcategory,
        })
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn subcategory(&self) -> Option<&str> {
        self.subcategory.as_deref()
    }

    pub fn def(&self) -> Option<&'static CategoryDef> {
        categories().find(|c| c.key == self.category)
    }

    pub fn offers_platforms(&self) -> bool {
        self.def().map_or(false, |c| c.offers_platforms)
    }
}

#[derive(Deserialize)]
struct RawPlacement {
    #[serde(rename = "categoria")]
    category: String,
    #[serde(rename = "subcategoria", default)]
    subcategory: Option<String>,
}

impl TryFrom<RawPlacement> for Placement {
    type Error = CatalogError;

    fn try_from(raw: RawPlacement) -> Result<Self, Self::Error> {
        Placement::resolve(&raw.category, raw.subcategory.as_deref())
    }
}

fn category_def(category: &str) -> Result<&'static CategoryDef, CatalogError> {
    categories()
        .find(|c| c.key == category)
        .ok_or_else(|| CatalogError::category_not_found(category))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_grouped_requires_known_subcategory() {
        let p = Placement::resolve("juegos", Some("pc")).unwrap();
        assert_eq!(p.category(), "juegos");
        assert_eq!(p.subcategory(), Some("pc"));

        assert!(Placement::resolve("juegos", None).is_err());
        assert!(Placement::resolve("juegos", Some("  ")).is_err());
        assert!(Placement::resolve("juegos", Some("ps5")).is_err());
    }

    #[test]
    fn test_resolve_flat_drops_subcategory() {
        let p = Placement::resolve("animes", Some("pc")).unwrap();
        assert_eq!(p.subcategory(), None);
        assert!(!p.offers_platforms());
    }

    #[test]
    fn test_deserialize_validates_against_index() {
        let ok: Placement =
            serde_json::from_str(r#"{"categoria":"aplicaciones","subcategoria":"android"}"#).unwrap();
        assert_eq!(ok.subcategory(), Some("android"));

        let bad = serde_json::from_str::<Placement>(r#"{"categoria":"aplicaciones"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_resolve_unknown_category() {
        assert!(Placement::resolve("podcasts", None).unwrap_err().is_not_found());
    }
}
