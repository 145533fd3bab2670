use std::sync::Arc;

use axum::{Json, extract::State, http::HeaderMap, response::IntoResponse};
use serde::Serialize;

use caregate_application::AuthenticationService;
use caregate_core::{
    AccountId, CredentialStore, NotificationGateway, OtpStore, ProfileStore, TokenService,
    UserProfile,
};

use super::authenticate::require_principal;
use super::error::ApiError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileHttpResponse {
    pub id: AccountId,
    pub first_name: String,
    pub last_name: String,
}

impl From<UserProfile> for ProfileHttpResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            first_name: profile.first_name,
            last_name: profile.last_name,
        }
    }
}

/// Returns the caller's own profile. The subject comes from the validated
/// access token, so there is no way to address another account's profile
/// through this route.
#[tracing::instrument(name = "Get profile", skip_all)]
pub async fn profile<C, P, O, N, K>(
    State(service): State<Arc<AuthenticationService<C, P, O, N, K>>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError>
where
    C: CredentialStore + 'static,
    P: ProfileStore + 'static,
    O: OtpStore + 'static,
    N: NotificationGateway + 'static,
    K: TokenService + 'static,
{
    let principal = require_principal(&headers, service.token_service())?;

    let profile = service
        .find_profile(principal.subject())
        .await
        .map_err(|e| ApiError::Unexpected(e.to_string()))?
        .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?;

    Ok(Json(ProfileHttpResponse::from(profile)))
}
