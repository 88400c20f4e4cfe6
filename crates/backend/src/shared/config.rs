use contracts::domain::a001_product::UploadLimits;
use contracts::usecases::u501_import_from_pdf::DEFAULT_MAX_PDF_BYTES;
use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub uploads: UploadsConfig,
    #[serde(default)]
    pub import: ImportConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

fn default_port() -> u16 {
    3000
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "target/db/catalog.db".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AuthConfig {
    /// argon2 PHC строка. Пустая: вход администратора отключён
    #[serde(default)]
    pub admin_password_hash: String,
    /// Пустая строка: случайный секрет на время жизни процесса
    #[serde(default)]
    pub jwt_secret: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadsConfig {
    pub max_image_bytes: u64,
    pub max_logo_bytes: u64,
    pub max_pdf_bytes: u64,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        let limits = UploadLimits::default();
        Self {
            max_image_bytes: limits.max_image_bytes,
            max_logo_bytes: limits.max_logo_bytes,
            max_pdf_bytes: DEFAULT_MAX_PDF_BYTES,
        }
    }
}

impl UploadsConfig {
    pub fn limits(&self) -> UploadLimits {
        UploadLimits {
            max_image_bytes: self.max_image_bytes,
            max_logo_bytes: self.max_logo_bytes,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ImportConfig {
    /// Пустая строка: импорт PDF недоступен
    #[serde(default)]
    pub extractor_url: String,
    #[serde(default = "default_import_timeout")]
    pub timeout_secs: u64,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            extractor_url: String::new(),
            timeout_secs: default_import_timeout(),
        }
    }
}

fn default_import_timeout() -> u64 {
    60
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    #[serde(default = "default_true")]
    pub seed_fixtures: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            seed_fixtures: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
port = 3000

[database]
path = "target/db/catalog.db"

[uploads]
max_image_bytes = 5242880
max_logo_bytes = 2097152
max_pdf_bytes = 10485760

[import]
extractor_url = ""
timeout_secs = 60

[catalog]
seed_fixtures = true
"#;

static CONFIG: OnceCell<Config> = OnceCell::new();

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Сохранить загруженную конфигурацию для всего процесса
pub fn install(config: Config) -> anyhow::Result<&'static Config> {
    CONFIG
        .set(config)
        .map_err(|_| anyhow::anyhow!("Configuration is already installed"))?;
    Ok(config_ref())
}

/// Текущая конфигурация; до `install` отдаются значения по умолчанию
pub fn config_ref() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> PathBuf {
    let db_path_str = &config.database.path;
    let db_path = Path::new(db_path_str);

    if db_path.is_absolute() {
        return db_path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(db_path);
        }
    }

    PathBuf::from(db_path_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.database.path, "target/db/catalog.db");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.uploads.limits(), UploadLimits::default());
        assert_eq!(config.uploads.max_pdf_bytes, 10 * 1024 * 1024);
        assert!(config.auth.admin_password_hash.is_empty());
        assert!(config.catalog.seed_fixtures);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [import]
            extractor_url = "http://127.0.0.1:8001/extract"
            "#,
        )
        .unwrap();
        assert_eq!(config.import.extractor_url, "http://127.0.0.1:8001/extract");
        assert_eq!(config.import.timeout_secs, 60);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.uploads.max_logo_bytes, 2 * 1024 * 1024);
    }

    #[test]
    fn test_workspace_config_file_parses() {
        let config: Config = toml::from_str(include_str!("../../../../config.toml")).unwrap();
        assert_eq!(config.database.path, "target/db/catalog.db");
        assert_eq!(config.import.timeout_secs, 60);
    }

    #[test]
    fn test_absolute_database_path_is_kept() {
        let mut config = Config::default();
        let absolute = std::env::temp_dir().join("catalog.db");
        config.database.path = absolute.to_string_lossy().to_string();
        assert_eq!(get_database_path(&config), absolute);
    }
}
