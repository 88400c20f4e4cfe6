//! Проверка доступа администратора.
//!
//! Обработчики знают только интерфейс [`AdminGate`]: "разрешить" или "отказать".
//! Учётные данные в коде не хранятся.

use async_trait::async_trait;
use contracts::system::auth::Capability;
use once_cell::sync::OnceCell;

use super::password::verify_password;

#[async_trait]
pub trait AdminGate: Send + Sync {
    async fn check(&self, password: &str) -> anyhow::Result<Capability>;
}

/// Проверка по argon2 хэшу из конфигурации
pub struct PasswordHashGate {
    hash: String,
}

impl PasswordHashGate {
    pub fn new(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    pub fn is_configured(&self) -> bool {
        !self.hash.trim().is_empty()
    }
}

#[async_trait]
impl AdminGate for PasswordHashGate {
    async fn check(&self, password: &str) -> anyhow::Result<Capability> {
        if !self.is_configured() || password.is_empty() {
            return Ok(Capability::Deny);
        }
        let hash = self.hash.trim().to_string();
        let password = password.to_string();
        // argon2 считается в blocking пуле
        let matches =
            tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await??;
        Ok(if matches {
            Capability::Allow
        } else {
            Capability::Deny
        })
    }
}

static GATE: OnceCell<Box<dyn AdminGate>> = OnceCell::new();

/// Установить проверку доступа для процесса
pub fn install(gate: Box<dyn AdminGate>) -> anyhow::Result<()> {
    GATE.set(gate)
        .map_err(|_| anyhow::anyhow!("Admin gate is already installed"))
}

/// Текущая проверка доступа; без `install` всегда отказ
pub fn admin_gate() -> &'static dyn AdminGate {
    GATE.get_or_init(|| Box::new(PasswordHashGate::new(String::new())))
        .as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::auth::password::hash_password;

    #[tokio::test]
    async fn test_gate_allows_only_matching_password() {
        let gate = PasswordHashGate::new(hash_password("mara-secret").unwrap());
        assert_eq!(gate.check("mara-secret").await.unwrap(), Capability::Allow);
        assert_eq!(gate.check("admin123").await.unwrap(), Capability::Deny);
        assert_eq!(gate.check("").await.unwrap(), Capability::Deny);
    }

    #[tokio::test]
    async fn test_unconfigured_gate_denies_everything() {
        let gate = PasswordHashGate::new("");
        assert!(!gate.is_configured());
        assert_eq!(gate.check("anything").await.unwrap(), Capability::Deny);
    }
}
