//! Форма администратора для добавления товара.
//!
//! Вся проверка выполняется до отправки: если `submit` вернул ошибку,
//! сетевого запроса не было.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::aggregate::{Product, ProductDto, ProductId};
use super::release_date::parse_release_date;
use crate::domain::a002_category::Placement;
use crate::domain::common::{CatalogError, FormField, ValidationErrors};

pub const MIB: u64 = 1024 * 1024;

/// Потолки размеров загружаемых изображений
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadLimits {
    pub max_image_bytes: u64,
    pub max_logo_bytes: u64,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_image_bytes: 5 * MIB,
            max_logo_bytes: 2 * MIB,
        }
    }
}

/// Назначение загружаемого изображения; у каждого свой потолок
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    ProductImage,
    Logo,
}

impl UploadKind {
    pub fn field(&self) -> FormField {
        match self {
            UploadKind::ProductImage => FormField::Image,
            UploadKind::Logo => FormField::Logo,
        }
    }

    pub fn ceiling(&self, limits: &UploadLimits) -> u64 {
        match self {
            UploadKind::ProductImage => limits.max_image_bytes,
            UploadKind::Logo => limits.max_logo_bytes,
        }
    }
}

/// Загруженный файл, уже прочитанный в `data:` URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub content_type: String,
    pub size: u64,
    pub data_url: String,
}

impl UploadedImage {
    /// Разобрать `data:<type>;base64,<payload>`. Размер оценивается по длине base64.
    pub fn from_data_url(data_url: &str) -> Option<Self> {
        let rest = data_url.strip_prefix("data:")?;
        let (meta, payload) = rest.split_once(',')?;
        let content_type = meta.split(';').next().unwrap_or_default().to_string();
        let size = if meta.ends_with(";base64") {
            let len = payload.trim_end_matches('=').len() as u64;
            len * 3 / 4
        } else {
            payload.len() as u64
        };
        Some(Self {
            content_type,
            size,
            data_url: data_url.to_string(),
        })
    }
}

/// Источник изображения: ссылка или загруженный файл
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Url(String),
    Upload(UploadedImage),
}

impl ImageSource {
    /// Восстановить источник из строки `imagen` (URL или data URL)
    pub fn from_reference(reference: &str) -> Option<Self> {
        let trimmed = reference.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.starts_with("data:") {
            return Some(match UploadedImage::from_data_url(trimmed) {
                Some(upload) => ImageSource::Upload(upload),
                None => ImageSource::Upload(UploadedImage {
                    content_type: String::new(),
                    size: trimmed.len() as u64,
                    data_url: trimmed.to_string(),
                }),
            });
        }
        Some(ImageSource::Url(trimmed.to_string()))
    }

    /// Проверить источник и вернуть строку для поля `imagen`
    pub fn validate(&self, kind: UploadKind, limits: &UploadLimits) -> Result<String, ValidationErrors> {
        match self {
            ImageSource::Url(url) => {
                let url = url.trim();
                if url.is_empty() {
                    return Err(ValidationErrors::single(
                        kind.field(),
                        "Por favor agrega una imagen",
                    ));
                }
                Ok(url.to_string())
            }
            ImageSource::Upload(upload) => {
                check_upload(kind, &upload.content_type, upload.size, limits)?;
                Ok(upload.data_url.clone())
            }
        }
    }
}

/// Проверка типа и размера файла до чтения/отправки
pub fn check_upload(
    kind: UploadKind,
    content_type: &str,
    size: u64,
    limits: &UploadLimits,
) -> Result<(), ValidationErrors> {
    if !content_type.starts_with("image/") {
        return Err(ValidationErrors::single(
            kind.field(),
            "Por favor selecciona un archivo de imagen válido",
        ));
    }
    let ceiling = kind.ceiling(limits);
    if size > ceiling {
        return Err(ValidationErrors::single(
            kind.field(),
            format!(
                "La imagen es demasiado grande. Máximo {} MB",
                ceiling / MIB
            ),
        ));
    }
    Ok(())
}

/// Состояние формы "Agregar producto"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub category: String,
    pub subcategory: String,
    pub titulo: String,
    pub descripcion: String,
    pub image: Option<ImageSource>,
    pub pais: String,
    pub fecha_lanzamiento: String,
    pub plataformas: Vec<String>,
}

/// Проверенный товар без id (id назначает хранилище)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub placement: Placement,
    pub titulo: String,
    pub descripcion: String,
    pub imagen: String,
    pub pais: String,
    pub fecha_lanzamiento: NaiveDate,
    pub plataformas: Option<Vec<String>>,
}

impl NewProduct {
    pub fn into_product(self, id: ProductId) -> (Placement, Product) {
        let product = Product {
            id,
            titulo: self.titulo,
            descripcion: self.descripcion,
            imagen: self.imagen,
            pais: self.pais,
            fecha_lanzamiento: self.fecha_lanzamiento,
            plataformas: self.plataformas,
        };
        (self.placement, product)
    }

    pub fn to_dto(&self, id: Option<&ProductId>) -> ProductDto {
        ProductDto {
            id: id.map(|i| i.to_string()),
            categoria: self.placement.category().to_string(),
            subcategoria: self.placement.subcategory().map(str::to_string),
            titulo: self.titulo.clone(),
            descripcion: self.descripcion.clone(),
            imagen: self.imagen.clone(),
            pais: self.pais.clone(),
            fecha_lanzamiento: self.fecha_lanzamiento.format("%Y-%m-%d").to_string(),
            plataformas: self.plataformas.clone(),
        }
    }
}

impl ProductForm {
    /// Добавить платформу; пустые и повторяющиеся значения отбрасываются
    pub fn add_platform(&mut self, platform: &str) -> bool {
        let platform = platform.trim();
        if platform.is_empty() || self.plataformas.iter().any(|p| p == platform) {
            return false;
        }
        self.plataformas.push(platform.to_string());
        true
    }

    pub fn remove_platform(&mut self, platform: &str) {
        self.plataformas.retain(|p| p != platform);
    }

    /// Смена категории сбрасывает подкатегорию
    pub fn set_category(&mut self, category: &str) {
        if self.category != category {
            self.category = category.to_string();
            self.subcategory.clear();
        }
    }

    /// Заполнить форму из существующего товара (режим редактирования)
    pub fn from_product(placement: &Placement, product: &Product) -> Self {
        Self {
            category: placement.category().to_string(),
            subcategory: placement.subcategory().unwrap_or_default().to_string(),
            titulo: product.titulo.clone(),
            descripcion: product.descripcion.clone(),
            image: ImageSource::from_reference(&product.imagen),
            pais: product.pais.clone(),
            fecha_lanzamiento: product.fecha_lanzamiento.format("%Y-%m-%d").to_string(),
            plataformas: product.plataformas.clone().unwrap_or_default(),
        }
    }

    /// Проверить все поля и собрать товар. Ошибки собираются по всем полям сразу.
    pub fn submit(&self, limits: &UploadLimits) -> Result<NewProduct, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let category = self.category.trim();
        let placement = if category.is_empty() {
            errors.push(FormField::Category, "Selecciona una categoría");
            None
        } else {
            match Placement::resolve(category, Some(self.subcategory.as_str())) {
                Ok(p) => Some(p),
                Err(CatalogError::NotFound { kind: "category", .. }) => {
                    errors.push(FormField::Category, "Categoría desconocida");
                    None
                }
                Err(_) => {
                    errors.push(FormField::Subcategory, "Selecciona una subcategoría");
                    None
                }
            }
        };

        let titulo = self.titulo.trim();
        if titulo.is_empty() {
            errors.push(FormField::Title, "El título es obligatorio");
        }
        let descripcion = self.descripcion.trim();
        if descripcion.is_empty() {
            errors.push(FormField::Description, "La descripción es obligatoria");
        }

        let imagen = match &self.image {
            None => {
                errors.push(FormField::Image, "Por favor agrega una imagen");
                None
            }
            Some(source) => match source.validate(UploadKind::ProductImage, limits) {
                Ok(reference) => Some(reference),
                Err(e) => {
                    for err in e.errors {
                        errors.push(err.field, err.message);
                    }
                    None
                }
            },
        };

        let pais = self.pais.trim();
        if pais.is_empty() {
            errors.push(FormField::Country, "El país es obligatorio");
        }

        let fecha = if self.fecha_lanzamiento.trim().is_empty() {
            errors.push(FormField::ReleaseDate, "La fecha de lanzamiento es obligatoria");
            None
        } else {
            match parse_release_date(&self.fecha_lanzamiento) {
                Ok(d) => Some(d),
                Err(e) => {
                    errors.push(FormField::ReleaseDate, e);
                    None
                }
            }
        };

        errors.into_result()?;

        // После into_result все Option заполнены
        let (Some(placement), Some(imagen), Some(fecha_lanzamiento)) = (placement, imagen, fecha)
        else {
            return Err(ValidationErrors::single(FormField::Category, "Formulario incompleto"));
        };

        let plataformas = placement.offers_platforms().then(|| {
            self.plataformas
                .iter()
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect()
        });

        Ok(NewProduct {
            placement,
            titulo: titulo.to_string(),
            descripcion: descripcion.to_string(),
            imagen,
            pais: pais.to_string(),
            fecha_lanzamiento,
            plataformas,
        })
    }
}

impl From<&ProductDto> for ProductForm {
    fn from(dto: &ProductDto) -> Self {
        Self {
            category: dto.categoria.clone(),
            subcategory: dto.subcategoria.clone().unwrap_or_default(),
            titulo: dto.titulo.clone(),
            descripcion: dto.descripcion.clone(),
            image: ImageSource::from_reference(&dto.imagen),
            pais: dto.pais.clone(),
            fecha_lanzamiento: dto.fecha_lanzamiento.clone(),
            plataformas: dto.plataformas.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> ProductForm {
        ProductForm {
            category: "juegos".into(),
            subcategory: "pc".into(),
            titulo: "Hades".into(),
            descripcion: "Roguelike en el inframundo".into(),
            image: Some(ImageSource::Url("https://example.com/hades.png".into())),
            pais: "Estados Unidos".into(),
            fecha_lanzamiento: "2020-09-17".into(),
            plataformas: vec!["PC".into(), "Switch".into()],
        }
    }

    #[test]
    fn test_missing_image_fails_on_image_field() {
        let mut form = filled_form();
        form.image = None;
        let errors = form.submit(&UploadLimits::default()).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![FormField::Image]);
    }

    #[test]
    fn test_valid_form_keeps_platforms_for_games() {
        let product = filled_form().submit(&UploadLimits::default()).unwrap();
        assert_eq!(product.placement.subcategory(), Some("pc"));
        assert_eq!(product.plataformas, Some(vec!["PC".to_string(), "Switch".to_string()]));
        assert_eq!(product.fecha_lanzamiento, NaiveDate::from_ymd_opt(2020, 9, 17).unwrap());
    }

    #[test]
    fn test_platforms_dropped_for_flat_categories() {
        let mut form = filled_form();
        form.set_category("peliculas");
        let product = form.submit(&UploadLimits::default()).unwrap();
        assert_eq!(product.placement.subcategory(), None);
        assert_eq!(product.plataformas, None);
    }

    #[test]
    fn test_subcategory_required_for_grouped_category() {
        let mut form = filled_form();
        form.set_category("aplicaciones");
        let errors = form.submit(&UploadLimits::default()).unwrap_err();
        assert!(errors.for_field(FormField::Subcategory).is_some());
        assert!(errors.for_field(FormField::Category).is_none());
    }

    #[test]
    fn test_all_missing_fields_reported() {
        let errors = ProductForm::default()
            .submit(&UploadLimits::default())
            .unwrap_err();
        let fields: Vec<FormField> = errors.fields().collect();
        assert_eq!(
            fields,
            vec![
                FormField::Category,
                FormField::Title,
                FormField::Description,
                FormField::Image,
                FormField::Country,
                FormField::ReleaseDate,
            ]
        );
    }

    #[test]
    fn test_upload_ceilings_are_independent() {
        let limits = UploadLimits::default();
        let three_mib = 3 * MIB;
        assert!(check_upload(UploadKind::ProductImage, "image/png", three_mib, &limits).is_ok());
        let err = check_upload(UploadKind::Logo, "image/png", three_mib, &limits).unwrap_err();
        assert!(err.for_field(FormField::Logo).is_some());
    }

    #[test]
    fn test_non_image_upload_rejected() {
        let mut form = filled_form();
        form.image = Some(ImageSource::Upload(UploadedImage {
            content_type: "application/pdf".into(),
            size: 1024,
            data_url: "data:application/pdf;base64,AAAA".into(),
        }));
        let errors = form.submit(&UploadLimits::default()).unwrap_err();
        assert_eq!(
            errors.for_field(FormField::Image),
            Some("Por favor selecciona un archivo de imagen válido")
        );
    }

    #[test]
    fn test_data_url_reference_is_rechecked() {
        let source = ImageSource::from_reference("data:image/png;base64,iVBORw0KGgo=").unwrap();
        match &source {
            ImageSource::Upload(u) => {
                assert_eq!(u.content_type, "image/png");
                assert_eq!(u.size, 8);
            }
            other => panic!("unexpected source {:?}", other),
        }
        let tiny = UploadLimits {
            max_image_bytes: 4,
            max_logo_bytes: 4,
        };
        assert!(source.validate(UploadKind::ProductImage, &tiny).is_err());
    }

    #[test]
    fn test_add_platform_skips_blank_and_duplicates() {
        let mut form = ProductForm::default();
        assert!(form.add_platform(" PC "));
        assert!(!form.add_platform("PC"));
        assert!(!form.add_platform("   "));
        form.remove_platform("PC");
        assert!(form.plataformas.is_empty());
    }

    #[test]
    fn test_dto_round_trip_through_form() {
        let product = filled_form().submit(&UploadLimits::default()).unwrap();
        let dto = product.to_dto(None);
        let again = ProductForm::from(&dto).submit(&UploadLimits::default()).unwrap();
        assert_eq!(again, product);
    }
}
