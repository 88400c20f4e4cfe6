use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a001_product::{ProductCreated, ProductDto, ProductId};
use contracts::domain::a003_catalog::CatalogEntry;
use contracts::domain::common::{AggregateId, CatalogError};

use super::error::ApiError;
use crate::domain::{a001_product, a003_catalog};

/// id из пути; пустой id считается несуществующим товаром
fn product_id(raw: &str) -> Result<ProductId, ApiError> {
    ProductId::from_string(raw).map_err(|_| CatalogError::product_not_found(raw).into())
}

/// GET /api/products?categoria&subcategoria&search
pub async fn list(
    Query(query): Query<a003_catalog::service::ProductQuery>,
) -> Result<Json<Vec<CatalogEntry>>, ApiError> {
    let entries = a003_catalog::service::query_products(&query).await?;
    Ok(Json(entries))
}

/// GET /api/products/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<CatalogEntry>, ApiError> {
    let product_id = product_id(&id)?;
    match a001_product::service::get_by_id(&product_id).await? {
        Some(entry) => Ok(Json(entry)),
        None => Err(CatalogError::product_not_found(product_id.as_str()).into()),
    }
}

/// POST /api/products
pub async fn create(
    Json(dto): Json<ProductDto>,
) -> Result<(StatusCode, Json<ProductCreated>), ApiError> {
    let id = a001_product::service::create(dto).await?;
    Ok((StatusCode::CREATED, Json(ProductCreated { id })))
}

/// PUT /api/products/:id
pub async fn update(
    Path(id): Path<String>,
    Json(dto): Json<ProductDto>,
) -> Result<StatusCode, ApiError> {
    a001_product::service::update(&product_id(&id)?, dto).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/products/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    a001_product::service::delete(&product_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_blank_path_id_is_not_found() {
        let err = product_id("   ").unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(product_id(" 7 ").unwrap(), ProductId::new("7"));
    }
}
