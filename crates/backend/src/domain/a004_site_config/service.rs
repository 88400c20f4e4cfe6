use super::repository;
use contracts::domain::a001_product::ImageSource;
use contracts::domain::a004_site_config::{validate_logo, SiteConfigEntry, SocialConfig, LOGO_KEY, SOCIAL_KEY};
use contracts::domain::common::{CatalogError, FormField, ValidationErrors};

use crate::shared::config::config_ref;

/// Значение по ключу; неизвестный ключ читается как пустое значение
pub async fn get(key: &str) -> anyhow::Result<SiteConfigEntry> {
    Ok(repository::get(key)
        .await?
        .unwrap_or_else(|| SiteConfigEntry::empty(key)))
}

/// Привести запись к сохраняемому виду по правилам её ключа
fn normalize(entry: SiteConfigEntry) -> Result<SiteConfigEntry, CatalogError> {
    let key = entry.key.trim().to_string();
    if key.is_empty() {
        return Err(CatalogError::NotFound {
            kind: "config key",
            key,
        });
    }
    match key.as_str() {
        LOGO_KEY => {
            let source = ImageSource::from_reference(&entry.value);
            Ok(validate_logo(source.as_ref(), &config_ref().uploads.limits())?)
        }
        SOCIAL_KEY => {
            let social = SocialConfig::from_entry(&entry).map_err(|e| {
                ValidationErrors::single(FormField::Social, format!("JSON inválido: {}", e))
            })?;
            social
                .into_entry()
                .map_err(|e| CatalogError::RemoteFailure(e.to_string()))
        }
        _ => Ok(SiteConfigEntry::new(key, entry.value)),
    }
}

/// Сохранить запись настроек
pub async fn save(entry: SiteConfigEntry) -> anyhow::Result<SiteConfigEntry> {
    let entry = normalize(entry)?;
    repository::upsert(&entry).await?;
    tracing::info!("Site config '{}' saved", entry.key);
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_social_entry_is_sanitized() {
        let raw = SiteConfigEntry::new(
            SOCIAL_KEY,
            r#"{"socialNetworks":[{"name":"Facebook","url":""},{"name":"Instagram","url":"https://instagram.com/mara"}],
                "businessGroups":[{"name":"","description":"","link":""}]}"#,
        );
        let entry = normalize(raw).unwrap();
        let social = SocialConfig::from_entry(&entry).unwrap();
        assert_eq!(social.social_networks.len(), 1);
        assert!(social.business_groups.is_empty());
    }

    #[test]
    fn test_oversized_logo_is_rejected() {
        // ~3 MiB base64 полезной нагрузки
        let payload = "A".repeat(4 * 1024 * 1024);
        let raw = SiteConfigEntry::new(LOGO_KEY, format!("data:image/png;base64,{}", payload));
        match normalize(raw) {
            Err(CatalogError::Validation(errors)) => {
                assert!(errors.for_field(FormField::Logo).is_some())
            }
            other => panic!("unexpected: {:?}", other.map(|e| e.key)),
        }
    }

    #[test]
    fn test_other_keys_pass_through() {
        let entry = normalize(SiteConfigEntry::new(" tagline ", "Lo mejor")).unwrap();
        assert_eq!(entry.key, "tagline");
        assert!(normalize(SiteConfigEntry::new("  ", "x")).is_err());
    }
}
