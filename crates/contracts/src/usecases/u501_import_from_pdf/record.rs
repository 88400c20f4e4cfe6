use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::a001_product::{parse_release_date, NewProduct, PLACEHOLDER_IMAGE_URL};
use crate::domain::a002_category::{subcategories_of, Placement};
use crate::domain::common::{CatalogError, FormField, ValidationErrors};

/// Дата, которая подставляется, если сервис извлечения её не нашёл
pub const DEFAULT_IMPORT_DATE: &str = "2024-01-01";

/// Категория для записей, у которых сервис извлечения её не указал
pub const DEFAULT_IMPORT_CATEGORY: &str = "juegos";

/// Запись товара, извлечённая из PDF. Без id: его назначает сохранение.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedProduct {
    #[serde(default)]
    pub titulo: String,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub imagen: String,
    #[serde(default)]
    pub pais: String,
    #[serde(default, alias = "fecha_lanzamiento")]
    pub fecha_lanzamiento: String,
    #[serde(default)]
    pub plataformas: Vec<String>,
    #[serde(default)]
    pub categoria: String,
    #[serde(default)]
    pub subcategoria: Option<String>,
}

impl ImportedProduct {
    pub fn has_title(&self) -> bool {
        !self.titulo.trim().is_empty()
    }

    /// Подставить значения по умолчанию для пустых полей
    pub fn with_defaults(mut self) -> Self {
        if self.descripcion.trim().is_empty() {
            self.descripcion = "Descripción no disponible".to_string();
        }
        if self.imagen.trim().is_empty() {
            self.imagen = PLACEHOLDER_IMAGE_URL.to_string();
        }
        if self.pais.trim().is_empty() {
            self.pais = "No especificado".to_string();
        }
        if parse_release_date(&self.fecha_lanzamiento).is_err() {
            self.fecha_lanzamiento = DEFAULT_IMPORT_DATE.to_string();
        }
        self.categoria = match self.categoria.trim() {
            "" => DEFAULT_IMPORT_CATEGORY.to_string(),
            categoria => categoria.to_string(),
        };
        let has_subcategory = self
            .subcategoria
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty());
        if !has_subcategory {
            // Сгруппированная категория без подкатегории: первая полка
            self.subcategoria = subcategories_of(&self.categoria)
                .ok()
                .flatten()
                .and_then(|subs| subs.first())
                .map(|s| s.key.to_string());
        }
        self
    }

    /// Место записи в каталоге после подстановки значений по умолчанию
    pub fn placement(&self) -> Result<Placement, CatalogError> {
        Placement::resolve(&self.categoria, self.subcategoria.as_deref())
    }

    /// Превратить запись в товар для сохранения.
    ///
    /// Ошибка, если нет названия или место в каталоге неизвестно.
    pub fn into_new_product(self) -> Result<NewProduct, CatalogError> {
        if !self.has_title() {
            return Err(ValidationErrors::single(FormField::Title, "El título es obligatorio").into());
        }
        let record = self.with_defaults();
        let placement = record.placement()?;
        let fecha_lanzamiento =
            parse_release_date(&record.fecha_lanzamiento).unwrap_or_else(|_| default_date());
        let plataformas = placement.offers_platforms().then(|| {
            let mut tags: Vec<String> = Vec::new();
            for tag in record.plataformas.iter().map(|p| p.trim()).filter(|p| !p.is_empty()) {
                if !tags.iter().any(|t| t == tag) {
                    tags.push(tag.to_string());
                }
            }
            tags
        });
        Ok(NewProduct {
            placement,
            titulo: record.titulo.trim().to_string(),
            descripcion: record.descripcion.trim().to_string(),
            imagen: record.imagen.trim().to_string(),
            pais: record.pais.trim().to_string(),
            fecha_lanzamiento,
            plataformas,
        })
    }
}

fn default_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_snake_case_date_from_extractor() {
        let json = r#"{
            "titulo": "Halo 3",
            "fecha_lanzamiento": "2007-09-25",
            "categoria": "juegos",
            "subcategoria": "xboxOne",
            "plataformas": ["Xbox", " Xbox ", ""]
        }"#;
        let record: ImportedProduct = serde_json::from_str(json).unwrap();
        assert_eq!(record.fecha_lanzamiento, "2007-09-25");

        let product = record.into_new_product().unwrap();
        assert_eq!(product.placement.subcategory(), Some("xboxOne"));
        assert_eq!(product.plataformas, Some(vec!["Xbox".to_string()]));
        assert_eq!(product.imagen, PLACEHOLDER_IMAGE_URL);
        assert_eq!(product.pais, "No especificado");
    }

    #[test]
    fn test_missing_title_or_bad_placement_is_rejected() {
        let untitled = ImportedProduct {
            categoria: "peliculas".into(),
            ..Default::default()
        };
        assert!(untitled.into_new_product().is_err());

        let unknown = ImportedProduct {
            titulo: "Podcast".into(),
            categoria: "podcasts".into(),
            ..Default::default()
        };
        assert!(unknown.into_new_product().unwrap_err().is_not_found());
    }

    #[test]
    fn test_record_without_category_lands_on_first_games_shelf() {
        let record = ImportedProduct {
            titulo: "Halo 3".into(),
            ..Default::default()
        }
        .with_defaults();
        assert_eq!(record.categoria, "juegos");
        assert_eq!(record.subcategoria.as_deref(), Some("pc"));

        let product = record.into_new_product().unwrap();
        assert_eq!(product.placement.category(), "juegos");
        assert_eq!(product.placement.subcategory(), Some("pc"));
    }

    #[test]
    fn test_grouped_category_without_subcategory_gets_first_shelf() {
        let record = ImportedProduct {
            titulo: "Spotify".into(),
            categoria: "aplicaciones".into(),
            subcategoria: Some(" ".into()),
            ..Default::default()
        }
        .with_defaults();
        let first = subcategories_of("aplicaciones").unwrap().unwrap()[0].key;
        assert_eq!(record.subcategoria.as_deref(), Some(first));
        assert!(record.placement().is_ok());

        let flat = ImportedProduct {
            titulo: "Titanic".into(),
            categoria: "peliculas".into(),
            ..Default::default()
        }
        .with_defaults();
        assert_eq!(flat.subcategoria, None);
        assert!(flat.placement().is_ok());
    }

    #[test]
    fn test_bad_date_falls_back_to_default() {
        let record = ImportedProduct {
            titulo: "Survivor 2".into(),
            categoria: "realitys".into(),
            fecha_lanzamiento: "2001".into(),
            plataformas: vec!["TV".into()],
            ..Default::default()
        };
        let product = record.into_new_product().unwrap();
        assert_eq!(product.fecha_lanzamiento, default_date());
        assert_eq!(product.plataformas, None);
    }
}
