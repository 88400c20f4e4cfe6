use chrono::Utc;
use contracts::domain::a004_site_config::SiteConfigEntry;
use serde::{Deserialize, Serialize};

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{EntityTrait, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a004_site_config")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    pub value: String,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SiteConfigEntry {
    fn from(m: Model) -> Self {
        SiteConfigEntry::new(m.key, m.value)
    }
}

fn conn() -> anyhow::Result<&'static DatabaseConnection> {
    get_connection()
}

pub async fn get(key: &str) -> anyhow::Result<Option<SiteConfigEntry>> {
    let result = Entity::find_by_id(key.to_string()).one(conn()?).await?;
    Ok(result.map(Into::into))
}

/// Вставка или замена значения по ключу
pub async fn upsert(entry: &SiteConfigEntry) -> anyhow::Result<()> {
    let active = ActiveModel {
        key: Set(entry.key.clone()),
        value: Set(entry.value.clone()),
        updated_at: Set(Some(Utc::now())),
    };
    Entity::insert(active)
        .on_conflict(
            OnConflict::column(Column::Key)
                .update_columns([Column::Value, Column::UpdatedAt])
                .to_owned(),
        )
        .exec(conn()?)
        .await?;
    Ok(())
}
