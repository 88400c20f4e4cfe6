use super::repository;
use contracts::domain::a001_product::{NewProduct, ProductDto, ProductForm, ProductId, UploadLimits};
use contracts::domain::a002_category::Placement;
use contracts::domain::a003_catalog::{fixture_catalog, CatalogEntry};
use contracts::domain::common::CatalogError;

use crate::shared::config::config_ref;

/// Проверить DTO теми же правилами, что и форма администратора
fn prepare(dto: &ProductDto, limits: &UploadLimits) -> Result<NewProduct, CatalogError> {
    ProductForm::from(dto).submit(limits).map_err(CatalogError::from)
}

/// Позиция после обновления: на своей полке товар остаётся на месте,
/// при переносе уходит в конец новой полки
fn position_after_update(current: &Placement, target: &Placement, position: i64, next: i64) -> i64 {
    if current == target {
        position
    } else {
        next
    }
}

/// Создание нового товара
pub async fn create(dto: ProductDto) -> anyhow::Result<ProductId> {
    let new_product = prepare(&dto, &config_ref().uploads.limits())?;

    let id = match dto.id.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(requested) => {
            let id = ProductId::new(requested);
            if repository::exists(&id).await? {
                return Err(CatalogError::DuplicateId(id.to_string()).into());
            }
            id
        }
        None => ProductId::new_v4(),
    };

    let (placement, product) = new_product.into_product(id.clone());
    let position = repository::next_position().await?;
    repository::insert(&placement, &product, position).await?;
    tracing::info!("Product {} created in {:?}", id, placement);
    Ok(id)
}

/// Обновление существующего товара
pub async fn update(id: &ProductId, dto: ProductDto) -> anyhow::Result<()> {
    let (current, position) = repository::get_by_id(id)
        .await?
        .ok_or_else(|| CatalogError::product_not_found(id.as_str()))?;

    let new_product = prepare(&dto, &config_ref().uploads.limits())?;
    let (placement, product) = new_product.into_product(id.clone());

    let next = repository::next_position().await?;
    let position = position_after_update(&current.placement, &placement, position, next);
    repository::update(&placement, &product, position).await?;
    tracing::info!("Product {} updated", id);
    Ok(())
}

/// Удаление товара; каскадов нет
pub async fn delete(id: &ProductId) -> anyhow::Result<()> {
    if !repository::delete(id).await? {
        return Err(CatalogError::product_not_found(id.as_str()).into());
    }
    tracing::info!("Product {} deleted", id);
    Ok(())
}

pub async fn get_by_id(id: &ProductId) -> anyhow::Result<Option<CatalogEntry>> {
    Ok(repository::get_by_id(id).await?.map(|(entry, _)| entry))
}

pub async fn list_all() -> anyhow::Result<Vec<CatalogEntry>> {
    repository::list_all().await
}

/// Сохранить уже проверенный товар с новым id (импорт)
pub async fn insert_new(new_product: NewProduct) -> anyhow::Result<ProductId> {
    let id = ProductId::new_v4();
    let (placement, product) = new_product.into_product(id.clone());
    let position = repository::next_position().await?;
    repository::insert(&placement, &product, position).await?;
    Ok(id)
}

/// Заполнить пустую таблицу демонстрационным каталогом
pub async fn seed_fixtures_if_empty() -> anyhow::Result<usize> {
    if repository::count().await? > 0 {
        return Ok(0);
    }
    let store = fixture_catalog()?;
    let entries = store.entries();
    for (position, entry) in entries.iter().enumerate() {
        repository::insert(&entry.placement, &entry.product, position as i64).await?;
    }
    tracing::info!("Seeded {} fixture products", entries.len());
    Ok(entries.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::FormField;

    fn dto() -> ProductDto {
        ProductDto {
            id: None,
            categoria: "juegos".into(),
            subcategoria: Some("pc".into()),
            titulo: "Hades".into(),
            descripcion: "Roguelike".into(),
            imagen: "https://example.com/hades.png".into(),
            pais: "Estados Unidos".into(),
            fecha_lanzamiento: "2020-09-17".into(),
            plataformas: Some(vec!["PC".into()]),
        }
    }

    #[test]
    fn test_prepare_accepts_valid_dto() {
        let product = prepare(&dto(), &UploadLimits::default()).unwrap();
        assert_eq!(product.placement.category(), "juegos");
    }

    #[test]
    fn test_prepare_reports_missing_image() {
        let mut without_image = dto();
        without_image.imagen.clear();
        match prepare(&without_image, &UploadLimits::default()) {
            Err(CatalogError::Validation(errors)) => {
                assert!(errors.for_field(FormField::Image).is_some())
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_position_kept_on_same_shelf() {
        let pc = Placement::resolve("juegos", Some("pc")).unwrap();
        let movies = Placement::resolve("peliculas", None).unwrap();
        assert_eq!(position_after_update(&pc, &pc, 2, 40), 2);
        assert_eq!(position_after_update(&pc, &movies, 2, 40), 40);
    }
}
