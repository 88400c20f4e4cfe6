use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_import_from_pdf::ImportFromPdf;

use crate::shared::config::Config;
use crate::{handlers, system};

/// Запас на multipart-обёртку сверх размера самого PDF
const MULTIPART_OVERHEAD: u64 = 64 * 1024;

/// Конфигурация всех роутов приложения
pub fn configure_routes(config: &Config) -> Router {
    let pdf_body_limit = (config.uploads.max_pdf_bytes + MULTIPART_OVERHEAD) as usize;
    let u501 = ImportFromPdf::api_prefix();

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // AUTH (PUBLIC)
        // ========================================
        .route("/api/auth/login", post(system::handlers::auth::login))
        // ========================================
        // CATALOG (PUBLIC READ)
        // ========================================
        .route("/api/catalog", get(handlers::a003_catalog::get_catalog))
        .route(
            "/api/categories",
            get(handlers::a003_catalog::list_categories),
        )
        // A001 Product handlers
        .route(
            "/api/products",
            get(handlers::a001_product::list).post(handlers::a001_product::create).route_layer(
                middleware::from_fn(system::auth::middleware::require_admin_for_writes),
            ),
        )
        .route(
            "/api/products/:id",
            get(handlers::a001_product::get_by_id)
                .put(handlers::a001_product::update)
                .delete(handlers::a001_product::delete)
                .route_layer(middleware::from_fn(
                    system::auth::middleware::require_admin_for_writes,
                )),
        )
        // A004 Site config handlers
        .route(
            "/api/config",
            post(handlers::a004_site_config::upsert)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route("/api/config/:key", get(handlers::a004_site_config::get))
        // ========================================
        // USECASES (ADMIN)
        // ========================================
        .route(
            &format!("{}/import/pdf", u501),
            post(handlers::usecases::u501_import_pdf)
                .layer(DefaultBodyLimit::max(pdf_body_limit))
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            &format!("{}/import/save", u501),
            post(handlers::usecases::u501_save)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
}
