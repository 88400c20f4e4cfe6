use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ошибки ядра каталога.
///
/// Все ошибки локальные и восстанавливаемые: ни одна не должна ронять сессию.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Неизвестная категория, подкатегория или товар
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    /// Форма администратора не прошла проверку; запрос не отправлялся
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// Нарушен инвариант хранилища: id товара должен быть уникален во всём каталоге
    #[error("duplicate product id: {0}")]
    DuplicateId(String),

    /// Ошибка внешнего сервиса (импорт, сохранение, таймаут)
    #[error("remote failure: {0}")]
    RemoteFailure(String),
}

impl CatalogError {
    pub fn category_not_found(key: &str) -> Self {
        Self::NotFound {
            kind: "category",
            key: key.to_string(),
        }
    }

    pub fn subcategory_not_found(category: &str, sub: &str) -> Self {
        Self::NotFound {
            kind: "subcategory",
            key: format!("{}/{}", category, sub),
        }
    }

    pub fn product_not_found(id: &str) -> Self {
        Self::NotFound {
            kind: "product",
            key: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<ValidationErrors> for CatalogError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

/// Поле формы товара, к которому относится ошибка
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Category,
    Subcategory,
    Title,
    Description,
    Image,
    Country,
    ReleaseDate,
    Platforms,
    Logo,
    Social,
}

impl FormField {
    /// Подпись поля в UI
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Category => "Categoría",
            FormField::Subcategory => "Subcategoría",
            FormField::Title => "Título",
            FormField::Description => "Descripción",
            FormField::Image => "Imagen",
            FormField::Country => "País",
            FormField::ReleaseDate => "Fecha de lanzamiento",
            FormField::Platforms => "Plataformas",
            FormField::Logo => "Logo",
            FormField::Social => "Redes Sociales",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

/// Набор ошибок валидации, по одной (первой) на поле
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: FormField, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    /// Добавить ошибку, если для поля ещё нет ни одной
    pub fn push(&mut self, field: FormField, message: impl Into<String>) {
        if self.for_field(field).is_none() {
            self.errors.push(FieldError {
                field,
                message: message.into(),
            });
        }
    }

    pub fn for_field(&self, field: FormField) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.errors.iter().map(|e| e.field)
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field.label(), e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}
