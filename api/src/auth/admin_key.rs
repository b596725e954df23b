//! Admin key authentication middleware

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use sha2::{Digest, Sha256};

use crate::error::AppError;
use crate::AppState;

/// Hex-encoded SHA-256 of an API key
pub fn hash_api_key(key: &str) -> String {
    hex::encode(Sha256::digest(key.as_bytes()))
}

/// Extract the API key from the Authorization header
fn extract_api_key(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

/// Admin authentication middleware
///
/// Rejects the request unless its bearer key hashes to the configured
/// admin key hash. With no admin key configured every request is rejected.
pub async fn admin_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let expected = state.admin_key_hash.as_deref().ok_or(AppError::Unauthorized)?;
    let api_key = extract_api_key(&request).ok_or(AppError::Unauthorized)?;

    if hash_api_key(api_key) != expected {
        tracing::warn!(path = %request.uri().path(), "Rejected admin request with invalid key");
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}
