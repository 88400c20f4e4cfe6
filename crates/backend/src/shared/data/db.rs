use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

const CREATE_PRODUCT_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS a001_product (
        id TEXT PRIMARY KEY NOT NULL,
        categoria TEXT NOT NULL,
        subcategoria TEXT,
        titulo TEXT NOT NULL,
        descripcion TEXT NOT NULL DEFAULT '',
        imagen TEXT NOT NULL DEFAULT '',
        pais TEXT NOT NULL DEFAULT '',
        fecha_lanzamiento TEXT NOT NULL,
        plataformas TEXT,
        position INTEGER NOT NULL DEFAULT 0,
        created_at TEXT,
        updated_at TEXT
    );
"#;

const CREATE_SITE_CONFIG_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS a004_site_config (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL DEFAULT '',
        updated_at TEXT
    );
"#;

/// sqlite URL для файла БД (с учётом путей Windows)
fn sqlite_url(db_file: &Path) -> anyhow::Result<String> {
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    Ok(format!("sqlite://{}{}?mode=rwc", prefix, normalized))
}

pub async fn initialize_database(db_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let db_url = sqlite_url(db_file)?;
    tracing::info!("Opening database: {}", db_url);
    let conn = Database::connect(&db_url).await?;

    for (table, sql) in [
        ("a001_product", CREATE_PRODUCT_TABLE),
        ("a004_site_config", CREATE_SITE_CONFIG_TABLE),
    ] {
        conn.execute(Statement::from_string(DatabaseBackend::Sqlite, sql.to_string()))
            .await?;
        tracing::info!("Table {} is ready", table);
    }

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> anyhow::Result<&'static DatabaseConnection> {
    DB_CONN
        .get()
        .ok_or_else(|| anyhow::anyhow!("Database connection has not been initialized"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_url_for_unix_path() {
        let url = sqlite_url(Path::new("/var/lib/catalog/catalog.db")).unwrap();
        assert_eq!(url, "sqlite:///var/lib/catalog/catalog.db?mode=rwc");
    }
}
