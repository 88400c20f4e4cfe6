use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::domain::common::AggregateId;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор товара.
///
/// Фикстуры используют короткие числовые id ("1".."18"), новые записи
/// получают UUID. На входе принимается и число, и строка.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => ProductId(n.to_string()),
            RawId::Text(s) => ProductId(s),
        })
    }
}

impl AggregateId for ProductId {
    fn as_string(&self) -> String {
        self.0.clone()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Empty product id".to_string());
        }
        Ok(ProductId(trimmed.to_string()))
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Заглушка, которую UI подставляет, если изображение товара не загрузилось
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1578662996442-48f60103fc96?w=400&h=300&fit=crop";

/// Товар каталога (игра, приложение, сериал, фильм...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub titulo: String,
    #[serde(default)]
    pub descripcion: String,
    /// URL или `data:` ссылка
    #[serde(default)]
    pub imagen: String,
    #[serde(default)]
    pub pais: String,
    /// ISO дата (`YYYY-MM-DD`)
    pub fecha_lanzamiento: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plataformas: Option<Vec<String>>,
}

impl Product {
    /// Текст, по которому работает поиск
    pub fn searchable_text(&self) -> [&str; 2] {
        [&self.titulo, &self.descripcion]
    }

    /// Изображение для карточки: пустая ссылка сразу заменяется заглушкой
    pub fn image_or_placeholder(&self) -> &str {
        if self.imagen.trim().is_empty() {
            PLACEHOLDER_IMAGE_URL
        } else {
            &self.imagen
        }
    }

    /// Платформы для отображения: пустой список равнозначен отсутствию
    pub fn platform_tags(&self) -> Option<&[String]> {
        self.plataformas
            .as_deref()
            .filter(|tags| !tags.is_empty())
    }
}

// ============================================================================
// DTO
// ============================================================================

/// DTO для создания/обновления товара (тело POST/PUT /api/products)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub categoria: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategoria: Option<String>,
    #[serde(default)]
    pub titulo: String,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub imagen: String,
    #[serde(default)]
    pub pais: String,
    #[serde(default)]
    pub fecha_lanzamiento: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plataformas: Option<Vec<String>>,
}

/// Ответ на создание товара
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCreated {
    pub id: ProductId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_round_trips_fixture_shape() {
        let json = r#"{
            "id": 2,
            "titulo": "The Witcher 3",
            "descripcion": "Aventura épica con Geralt de Rivia en mundo abierto",
            "imagen": "https://example.com/w3.jpg",
            "pais": "Polonia",
            "fechaLanzamiento": "2015-05-19",
            "plataformas": ["PC", "Xbox"]
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new("2"));
        assert_eq!(
            product.fecha_lanzamiento,
            NaiveDate::from_ymd_opt(2015, 5, 19).unwrap()
        );

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["fechaLanzamiento"], "2015-05-19");
        assert_eq!(value["plataformas"][1], "Xbox");
        let again: Product = serde_json::from_value(value).unwrap();
        assert_eq!(again, product);
    }

    #[test]
    fn test_absent_platforms_are_not_serialized() {
        let product = Product {
            id: ProductId::new("10"),
            titulo: "Stranger Things".into(),
            descripcion: String::new(),
            imagen: String::new(),
            pais: "Estados Unidos".into(),
            fecha_lanzamiento: NaiveDate::from_ymd_opt(2016, 7, 15).unwrap(),
            plataformas: None,
        };
        let value = serde_json::to_value(&product).unwrap();
        assert!(value.get("plataformas").is_none());
        assert_eq!(product.image_or_placeholder(), PLACEHOLDER_IMAGE_URL);
        assert_eq!(product.platform_tags(), None);
    }

    #[test]
    fn test_empty_platform_list_has_no_tags() {
        let mut product: Product = serde_json::from_str(
            r#"{"id":"x","titulo":"A","fechaLanzamiento":"2020-01-01","plataformas":[]}"#,
        )
        .unwrap();
        assert_eq!(product.platform_tags(), None);
        product.plataformas = Some(vec!["PC".into()]);
        assert_eq!(product.platform_tags().map(|t| t.len()), Some(1));
    }
}
