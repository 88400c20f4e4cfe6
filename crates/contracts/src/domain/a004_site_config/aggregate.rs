use serde::{Deserialize, Serialize};

use crate::domain::a001_product::{ImageSource, UploadKind, UploadLimits};
use crate::domain::common::{FormField, ValidationErrors};

/// Ключ логотипа сайта (URL или data URL)
pub const LOGO_KEY: &str = "logo";
/// Ключ настроек соцсетей (JSON [`super::SocialConfig`])
pub const SOCIAL_KEY: &str = "social";

/// Запись настроек сайта ключ/значение.
///
/// Для неизвестного ключа сервер отдаёт пустое значение, а не 404.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfigEntry {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

impl SiteConfigEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn empty(key: impl Into<String>) -> Self {
        Self::new(key, String::new())
    }

    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// Проверить логотип перед сохранением (свой, меньший потолок размера)
pub fn validate_logo(
    source: Option<&ImageSource>,
    limits: &UploadLimits,
) -> Result<SiteConfigEntry, ValidationErrors> {
    let source = source.ok_or_else(|| {
        ValidationErrors::single(FormField::Logo, "Selecciona un logo para subir")
    })?;
    let value = source.validate(UploadKind::Logo, limits)?;
    Ok(SiteConfigEntry::new(LOGO_KEY, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_product::{UploadedImage, MIB};

    fn upload(content_type: &str, size: u64) -> ImageSource {
        ImageSource::Upload(UploadedImage {
            content_type: content_type.into(),
            size,
            data_url: format!("data:{};base64,AAAA", content_type),
        })
    }

    #[test]
    fn test_logo_has_smaller_ceiling_than_product_image() {
        let limits = UploadLimits::default();
        let three_mb = upload("image/png", 3 * MIB);

        assert!(three_mb.validate(UploadKind::ProductImage, &limits).is_ok());
        let err = validate_logo(Some(&three_mb), &limits).unwrap_err();
        assert!(err.for_field(FormField::Logo).unwrap().contains("2 MB"));
    }

    #[test]
    fn test_logo_rejects_non_image() {
        let limits = UploadLimits::default();
        let err = validate_logo(Some(&upload("application/pdf", 10)), &limits).unwrap_err();
        assert_eq!(err.fields().collect::<Vec<_>>(), vec![FormField::Logo]);
        assert!(validate_logo(None, &limits).is_err());
    }

    #[test]
    fn test_logo_url_is_accepted() {
        let limits = UploadLimits::default();
        let source = ImageSource::Url("https://cdn.example.com/logo.png".into());
        let entry = validate_logo(Some(&source), &limits).unwrap();
        assert_eq!(entry.key, LOGO_KEY);
        assert_eq!(entry.value, "https://cdn.example.com/logo.png");
    }
}
