//! Настройки соцсетей и бизнес-групп для подвала сайта.

use serde::{Deserialize, Serialize};

use super::aggregate::{SiteConfigEntry, SOCIAL_KEY};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SocialNetwork {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BusinessGroup {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: String,
}

impl BusinessGroup {
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialConfig {
    #[serde(default)]
    pub social_networks: Vec<SocialNetwork>,
    #[serde(default)]
    pub business_groups: Vec<BusinessGroup>,
}

impl SocialConfig {
    /// Набор для формы: четыре стандартные сети и одна пустая группа
    pub fn editor_defaults() -> Self {
        Self {
            social_networks: ["Facebook", "Instagram", "Twitter", "YouTube"]
                .into_iter()
                .map(|name| SocialNetwork {
                    name: name.to_string(),
                    url: String::new(),
                })
                .collect(),
            business_groups: vec![BusinessGroup::default()],
        }
    }

    /// Наложить сохранённые значения на набор формы
    pub fn merged_into_defaults(&self) -> Self {
        let mut form = Self::editor_defaults();
        for saved in &self.social_networks {
            match form.social_networks.iter_mut().find(|n| n.name == saved.name) {
                Some(slot) => slot.url = saved.url.clone(),
                None => form.social_networks.push(saved.clone()),
            }
        }
        if !self.business_groups.is_empty() {
            form.business_groups = self.business_groups.clone();
        }
        form
    }

    /// Отбросить сети без URL и группы без названия
    pub fn sanitize(mut self) -> Self {
        self.social_networks.retain(|n| !n.url.trim().is_empty());
        self.business_groups.retain(|g| !g.is_blank());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.social_networks.is_empty() && self.business_groups.is_empty()
    }

    /// Разобрать значение записи `social`; пустое значение = пустые настройки
    pub fn from_entry(entry: &SiteConfigEntry) -> Result<Self, serde_json::Error> {
        if entry.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(&entry.value)
    }

    /// Очищенные настройки в виде записи для сохранения
    pub fn into_entry(self) -> Result<SiteConfigEntry, serde_json::Error> {
        let value = serde_json::to_string(&self.sanitize())?;
        Ok(SiteConfigEntry::new(SOCIAL_KEY, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_drops_blank_entries() {
        let mut config = SocialConfig::editor_defaults();
        config.social_networks[1].url = "https://instagram.com/mara".into();
        config.business_groups.push(BusinessGroup {
            name: "Mara Gamers".into(),
            description: "Grupo de WhatsApp".into(),
            link: "https://chat.whatsapp.com/abc".into(),
        });

        let clean = config.sanitize();
        assert_eq!(clean.social_networks.len(), 1);
        assert_eq!(clean.social_networks[0].name, "Instagram");
        assert_eq!(clean.business_groups.len(), 1);
        assert_eq!(clean.business_groups[0].name, "Mara Gamers");
    }

    #[test]
    fn test_entry_round_trip_uses_camel_case() {
        let mut config = SocialConfig::editor_defaults();
        config.social_networks[0].url = "https://facebook.com/mara".into();
        let entry = config.into_entry().unwrap();
        assert_eq!(entry.key, SOCIAL_KEY);
        assert!(entry.value.contains("socialNetworks"));
        assert!(entry.value.contains("businessGroups"));

        let back = SocialConfig::from_entry(&entry).unwrap();
        assert_eq!(back.social_networks.len(), 1);
        assert!(back.business_groups.is_empty());
    }

    #[test]
    fn test_empty_entry_reads_as_default() {
        let entry = SiteConfigEntry::empty(SOCIAL_KEY);
        assert!(SocialConfig::from_entry(&entry).unwrap().is_empty());
    }

    #[test]
    fn test_merge_keeps_default_networks() {
        let saved = SocialConfig {
            social_networks: vec![SocialNetwork {
                name: "YouTube".into(),
                url: "https://youtube.com/@mara".into(),
            }],
            business_groups: Vec::new(),
        };
        let form = saved.merged_into_defaults();
        assert_eq!(form.social_networks.len(), 4);
        assert_eq!(form.social_networks[3].url, "https://youtube.com/@mara");
        assert_eq!(form.business_groups.len(), 1);
    }
}
