pub mod domain;
pub mod handlers;
pub mod routes;
pub mod shared;
pub mod system;
pub mod usecases;

/// `backend hash-password <password>`: напечатать argon2 хэш для config.toml
fn print_password_hash(args: &[String]) -> anyhow::Result<bool> {
    if args.get(1).map(String::as_str) != Some("hash-password") {
        return Ok(false);
    }
    let password = args
        .get(2)
        .ok_or_else(|| anyhow::anyhow!("usage: backend hash-password <password>"))?;
    println!("{}", system::auth::password::hash_password(password)?);
    Ok(true)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::http::{header, Method};
    use axum::middleware;
    use std::net::SocketAddr;
    use tokio::net::TcpListener;
    use tower_http::cors::{Any, CorsLayer};
    use tower_http::services::ServeDir;

    let args: Vec<String> = std::env::args().collect();
    if print_password_hash(&args)? {
        return Ok(());
    }

    system::tracing::initialize()?;

    let config = shared::config::install(shared::config::load_config()?)?;

    system::initialization::install_admin_gate(config)?;

    // Initialize database (path from config.toml)
    let db_path = shared::config::get_database_path(config);
    shared::data::db::initialize_database(&db_path)
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;

    system::initialization::seed_catalog(config).await?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    let app = routes::configure_routes(config)
        .fallback_service(ServeDir::new("dist"))
        .layer(cors)
        .layer(middleware::from_fn(
            system::middleware::request_logger::request_logger,
        ));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    config.server.port
                );
            } else {
                tracing::error!("Failed to bind to port {}. Error: {}", config.server.port, e);
            }
            return Err(e.into());
        }
    };

    tracing::info!("Catalog backend listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_command_needs_argument() {
        let args = vec!["backend".to_string(), "hash-password".to_string()];
        assert!(print_password_hash(&args).is_err());

        let args = vec!["backend".to_string()];
        assert!(!print_password_hash(&args).unwrap());
    }
}
