use chrono::Utc;
use contracts::domain::a001_product::{parse_release_date, Product, ProductId};
use contracts::domain::a002_category::Placement;
use contracts::domain::a003_catalog::CatalogEntry;
use serde::{Deserialize, Serialize};

use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub categoria: String,
    pub subcategoria: Option<String>,
    pub titulo: String,
    pub descripcion: String,
    pub imagen: String,
    pub pais: String,
    /// ISO дата
    pub fecha_lanzamiento: String,
    /// JSON массив строк
    pub plataformas: Option<String>,
    /// Порядок товара внутри полки
    pub position: i64,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for CatalogEntry {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> Result<Self, Self::Error> {
        let placement = Placement::resolve(&m.categoria, m.subcategoria.as_deref())?;
        let fecha_lanzamiento =
            parse_release_date(&m.fecha_lanzamiento).map_err(|e| anyhow::anyhow!(e))?;
        let plataformas = match m.plataformas {
            Some(json) if !json.trim().is_empty() => Some(serde_json::from_str(&json)?),
            _ => None,
        };
        Ok(CatalogEntry {
            placement,
            product: Product {
                id: ProductId::new(m.id),
                titulo: m.titulo,
                descripcion: m.descripcion,
                imagen: m.imagen,
                pais: m.pais,
                fecha_lanzamiento,
                plataformas,
            },
        })
    }
}

fn conn() -> anyhow::Result<&'static DatabaseConnection> {
    get_connection()
}

/// Строку, которая не сходится с индексом категорий, пропускаем с предупреждением
fn to_entry(model: Model) -> Option<CatalogEntry> {
    let id = model.id.clone();
    match CatalogEntry::try_from(model) {
        Ok(entry) => Some(entry),
        Err(e) => {
            tracing::warn!("Skipping product {}: {}", id, e);
            None
        }
    }
}

fn active_model(
    placement: &Placement,
    product: &Product,
    position: i64,
) -> anyhow::Result<ActiveModel> {
    let plataformas = product
        .plataformas
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;
    Ok(ActiveModel {
        id: Set(product.id.to_string()),
        categoria: Set(placement.category().to_string()),
        subcategoria: Set(placement.subcategory().map(str::to_string)),
        titulo: Set(product.titulo.clone()),
        descripcion: Set(product.descripcion.clone()),
        imagen: Set(product.imagen.clone()),
        pais: Set(product.pais.clone()),
        fecha_lanzamiento: Set(product.fecha_lanzamiento.format("%Y-%m-%d").to_string()),
        plataformas: Set(plataformas),
        position: Set(position),
        created_at: sea_orm::ActiveValue::NotSet,
        updated_at: Set(Some(Utc::now())),
    })
}

/// Все товары в порядке добавления
pub async fn list_all() -> anyhow::Result<Vec<CatalogEntry>> {
    let items = Entity::find()
        .order_by_asc(Column::Position)
        .order_by_asc(Column::CreatedAt)
        .all(conn()?)
        .await?
        .into_iter()
        .filter_map(to_entry)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: &ProductId) -> anyhow::Result<Option<(CatalogEntry, i64)>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()?).await?;
    Ok(result.and_then(|m| {
        let position = m.position;
        to_entry(m).map(|entry| (entry, position))
    }))
}

pub async fn exists(id: &ProductId) -> anyhow::Result<bool> {
    let count = Entity::find_by_id(id.to_string()).count(conn()?).await?;
    Ok(count > 0)
}

pub async fn count() -> anyhow::Result<u64> {
    Ok(Entity::find().count(conn()?).await?)
}

/// Позиция для товара, добавляемого в конец
pub async fn next_position() -> anyhow::Result<i64> {
    let max: Option<Option<i64>> = Entity::find()
        .select_only()
        .column_as(Column::Position.max(), "max_position")
        .into_tuple()
        .one(conn()?)
        .await?;
    Ok(max.flatten().map_or(0, |p| p + 1))
}

pub async fn insert(placement: &Placement, product: &Product, position: i64) -> anyhow::Result<()> {
    let mut active = active_model(placement, product, position)?;
    active.created_at = Set(Some(Utc::now()));
    active.insert(conn()?).await?;
    Ok(())
}

pub async fn update(placement: &Placement, product: &Product, position: i64) -> anyhow::Result<()> {
    active_model(placement, product, position)?
        .update(conn()?)
        .await?;
    Ok(())
}

pub async fn delete(id: &ProductId) -> anyhow::Result<bool> {
    let result = Entity::delete_by_id(id.to_string()).exec(conn()?).await?;
    Ok(result.rows_affected > 0)
}
