use axum::{extract::Json, http::StatusCode};
use contracts::system::auth::{LoginRequest, LoginResponse};

use crate::system::auth::capability::{admin_gate, AdminGate};
use crate::system::auth::jwt;

async fn login_with(gate: &dyn AdminGate, request: &LoginRequest) -> Result<LoginResponse, StatusCode> {
    let capability = gate.check(&request.password).await.map_err(|e| {
        tracing::error!("Admin gate failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    if !capability.is_allowed() {
        tracing::warn!("Admin login denied");
        return Err(StatusCode::UNAUTHORIZED);
    }

    let access_token = jwt::generate_admin_token().map_err(|e| {
        tracing::error!("Failed to issue admin token: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    tracing::info!("Admin login accepted");

    Ok(LoginResponse { access_token })
}

/// POST /api/auth/login
pub async fn login(Json(request): Json<LoginRequest>) -> Result<Json<LoginResponse>, StatusCode> {
    login_with(admin_gate(), &request).await.map(Json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use contracts::system::auth::Capability;

    struct FixedGate(Capability);

    #[async_trait]
    impl AdminGate for FixedGate {
        async fn check(&self, _password: &str) -> anyhow::Result<Capability> {
            Ok(self.0)
        }
    }

    fn request() -> LoginRequest {
        LoginRequest {
            password: "whatever".into(),
        }
    }

    #[tokio::test]
    async fn test_allow_issues_admin_token() {
        let response = login_with(&FixedGate(Capability::Allow), &request()).await.unwrap();
        let claims = jwt::validate_token(&response.access_token).unwrap();
        assert!(claims.is_admin);
    }

    #[tokio::test]
    async fn test_deny_is_unauthorized() {
        let err = login_with(&FixedGate(Capability::Deny), &request()).await.unwrap_err();
        assert_eq!(err, StatusCode::UNAUTHORIZED);
    }
}
