use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use caregate_application::AuthenticationService;
use caregate_core::{
    CredentialStore, NotificationGateway, OtpStore, ProfileStore, TokenService,
};

use super::error::{ApiError, auth_result_response};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshHttpRequest {
    pub refresh_token: String,
}

#[tracing::instrument(name = "Refresh token", skip(service, request))]
pub async fn refresh<C, P, O, N, K>(
    State(service): State<Arc<AuthenticationService<C, P, O, N, K>>>,
    Json(request): Json<RefreshHttpRequest>,
) -> Result<Response, ApiError>
where
    C: CredentialStore + 'static,
    P: ProfileStore + 'static,
    O: OtpStore + 'static,
    N: NotificationGateway + 'static,
    K: TokenService + 'static,
{
    let result = service.refresh_token(&request.refresh_token).await;

    Ok(auth_result_response(result, StatusCode::OK).into_response())
}
