use axum::{
    body::Body,
    extract::Request,
    http::{Method, StatusCode},
    middleware::Next,
    response::Response,
};
use contracts::system::auth::TokenClaims;

/// Достать токен из заголовка `Authorization: Bearer ...`
fn bearer_token(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

fn admin_claims(token: &str) -> Result<TokenClaims, StatusCode> {
    let claims = super::jwt::validate_token(token).map_err(|_| StatusCode::UNAUTHORIZED)?;
    if !claims.is_admin {
        return Err(StatusCode::FORBIDDEN);
    }
    Ok(claims)
}

/// Middleware that requires admin privileges
pub async fn require_admin(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let token = bearer_token(&req).ok_or(StatusCode::UNAUTHORIZED)?;
    let claims = admin_claims(token)?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

fn is_read_only(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

/// Чтение открыто всем, изменения только администратору
pub async fn require_admin_for_writes(req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    if is_read_only(req.method()) {
        return Ok(next.run(req).await);
    }
    require_admin(req, next).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_extraction() {
        let req = Request::builder()
            .header("Authorization", "Bearer abc.def.ghi")
            .body(Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&req), Some("abc.def.ghi"));

        let req = Request::builder()
            .header("Authorization", "Basic abc")
            .body(Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&req), None);
    }

    #[test]
    fn test_issued_token_passes_admin_check() {
        let token = super::super::jwt::generate_admin_token().unwrap();
        assert!(admin_claims(&token).unwrap().is_admin);
        assert_eq!(admin_claims("garbage").unwrap_err(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_only_reads_skip_admin_check() {
        assert!(is_read_only(&Method::GET));
        assert!(!is_read_only(&Method::POST));
        assert!(!is_read_only(&Method::PUT));
        assert!(!is_read_only(&Method::DELETE));
    }
}
