use anyhow::Result;

use crate::domain::a001_product;
use crate::shared::config::Config;
use crate::system::auth::capability::{self, PasswordHashGate};

/// Установить проверку доступа администратора
pub fn install_admin_gate(config: &Config) -> Result<()> {
    let gate = PasswordHashGate::new(config.auth.admin_password_hash.trim());
    if gate.is_configured() {
        tracing::info!("Admin gate: password hash configured");
    } else {
        println!("\n⚠  WARNING: [auth] admin_password_hash is empty!");
        println!("   Admin login is disabled. Generate a hash with:");
        println!("   backend hash-password <password>\n");
        tracing::warn!("Admin login disabled: no password hash configured");
    }
    capability::install(Box::new(gate))
}

/// Заполнить пустой каталог демонстрационными товарами
pub async fn seed_catalog(config: &Config) -> Result<()> {
    if !config.catalog.seed_fixtures {
        tracing::info!("Fixture seeding disabled");
        return Ok(());
    }
    let seeded = a001_product::service::seed_fixtures_if_empty().await?;
    if seeded > 0 {
        tracing::info!("Catalog seeded with {} fixture products", seeded);
    }
    Ok(())
}
