use anyhow::{Context, Result};
use chrono::Utc;
use contracts::system::auth::TokenClaims;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::OnceCell;
use rand::Rng;

use crate::shared::config::config_ref;

const ACCESS_TOKEN_LIFETIME_HOURS: i64 = 24;
const ADMIN_SUBJECT: &str = "admin";

static JWT_SECRET: OnceCell<String> = OnceCell::new();

/// Секрет из `[auth] jwt_secret` или случайный на время жизни процесса
pub fn jwt_secret() -> &'static str {
    JWT_SECRET.get_or_init(|| {
        let configured = config_ref().auth.jwt_secret.trim();
        if configured.is_empty() {
            tracing::info!("jwt_secret is not configured, using a per-process secret");
            generate_jwt_secret()
        } else {
            configured.to_string()
        }
    })
}

/// Cryptographically secure JWT secret (256 bits)
fn generate_jwt_secret() -> String {
    use base64::{engine::general_purpose, Engine as _};
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen::<u8>()).collect();
    general_purpose::STANDARD.encode(&random_bytes)
}

fn admin_claims(now: chrono::DateTime<Utc>) -> TokenClaims {
    TokenClaims {
        sub: ADMIN_SUBJECT.to_string(),
        is_admin: true,
        exp: (now + chrono::Duration::hours(ACCESS_TOKEN_LIFETIME_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    }
}

fn encode_with(claims: &TokenClaims, secret: &str) -> Result<String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("Failed to encode JWT token")
}

fn decode_with(token: &str, secret: &str) -> Result<TokenClaims> {
    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode JWT token")?;
    Ok(token_data.claims)
}

/// Токен администратора на 24 часа
pub fn generate_admin_token() -> Result<String> {
    encode_with(&admin_claims(Utc::now()), jwt_secret())
}

/// Validate JWT token and extract claims
pub fn validate_token(token: &str) -> Result<TokenClaims> {
    decode_with(token, jwt_secret())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        let secret = generate_jwt_secret();
        let token = encode_with(&admin_claims(Utc::now()), &secret).unwrap();
        let claims = decode_with(&token, &secret).unwrap();
        assert!(claims.is_admin);
        assert_eq!(claims.sub, ADMIN_SUBJECT);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = encode_with(&admin_claims(Utc::now()), "first").unwrap();
        assert!(decode_with(&token, "second").is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let issued = Utc::now() - chrono::Duration::hours(48);
        let token = encode_with(&admin_claims(issued), "secret").unwrap();
        assert!(decode_with(&token, "secret").is_err());
    }

    #[test]
    fn test_generated_secret_is_256_bits() {
        use base64::{engine::general_purpose, Engine as _};
        let secret = generate_jwt_secret();
        assert_eq!(general_purpose::STANDARD.decode(secret).unwrap().len(), 32);
    }
}
