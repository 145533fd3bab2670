use axum::http::{HeaderMap, header::AUTHORIZATION};

use caregate_core::{Principal, TokenService};

use super::error::ApiError;

const BEARER_PREFIX: &str = "Bearer ";

/// Resolves the caller from the `Authorization: Bearer` header.
///
/// Every failure collapses into `Unauthenticated`; the response never says
/// whether the header was missing, malformed or carried an invalid token.
pub fn require_principal<K: TokenService>(
    headers: &HeaderMap,
    token_service: &K,
) -> Result<Principal, ApiError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(ApiError::Unauthenticated)?;

    let token = header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(ApiError::Unauthenticated)?;

    token_service
        .validate_access_token(token)
        .ok_or(ApiError::Unauthenticated)
}
