// /pos-dashboard/services/pos-service/src/middleware/auth.rs

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::{models::ErrorResponse, AppState};

/// Endpoint yang tidak butuh bearer token
const PUBLIC_PATHS: &[&str] = &["/health", "/api/webhook/"];

/// Claims dari dashboard login token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub role: Option<String>,
    pub exp: usize,
}

/// Verifier untuk JWT HS256 yang ditandatangani dengan JWT_SECRET
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 60;

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.decoding_key, &self.validation).map(|data| data.claims)
    }
}

pub fn is_public_endpoint(path: &str) -> bool {
    // entry dengan trailing slash berlaku sebagai prefix
    PUBLIC_PATHS.iter().any(|public| {
        path == public.trim_end_matches('/') || (public.ends_with('/') && path.starts_with(public))
    })
}

fn unauthorized(message: &str, code: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            success: false,
            message: message.to_string(),
            error_code: Some(code.to_string()),
            details: None,
        }),
    )
}

/// Middleware untuk verify bearer token dashboard
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let path = req.uri().path().to_string();

    if is_public_endpoint(&path) || req.method() == axum::http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let token = req.headers()
        .get("authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string());

    let token = match token {
        Some(token) if !token.is_empty() => token,
        _ => {
            tracing::debug!("Request ke {} ditolak: missing authorization header", path);
            return Err(unauthorized("Authorization header diperlukan", "MISSING_TOKEN"));
        }
    };

    let claims = state.auth.verify(&token).map_err(|e| {
        tracing::warn!("Token verification failed for {}: {}", path, e);
        unauthorized("Token tidak valid atau expired", "INVALID_TOKEN")
    })?;

    tracing::debug!("✓ Authenticated {} for {}", claims.sub, path);
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn token(secret: &str, exp_offset_secs: i64) -> String {
        let claims = Claims {
            sub: "cashier-1".to_string(),
            role: Some("admin".to_string()),
            exp: (chrono::Utc::now().timestamp() + exp_offset_secs) as usize,
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    #[test]
    fn test_verify_valid_token() {
        let verifier = TokenVerifier::new(SECRET);
        let claims = verifier.verify(&token(SECRET, 3600)).unwrap();
        assert_eq!(claims.sub, "cashier-1");
        assert_eq!(claims.role.as_deref(), Some("admin"));
    }

    #[test]
    fn test_reject_wrong_secret_and_expired() {
        let verifier = TokenVerifier::new(SECRET);
        assert!(verifier.verify(&token("another-secret-another-secret-xx", 3600)).is_err());
        assert!(verifier.verify(&token(SECRET, -3600)).is_err());
        assert!(verifier.verify("not-a-jwt").is_err());
    }

    #[test]
    fn test_public_endpoints() {
        assert!(is_public_endpoint("/health"));
        assert!(is_public_endpoint("/api/webhook/xendit"));
        assert!(!is_public_endpoint("/api/orders"));
        assert!(!is_public_endpoint("/api/webhookx"));
        assert!(!is_public_endpoint("/healthz"));
    }
}
