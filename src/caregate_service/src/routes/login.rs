use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use secrecy::Secret;
use serde::Deserialize;

use caregate_application::AuthenticationService;
use caregate_core::{
    CredentialStore, Email, NotificationGateway, OtpStore, Password, ProfileStore, TokenService,
};

use super::error::{ApiError, auth_result_response};

#[derive(Debug, Deserialize)]
pub struct LoginHttpRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
}

#[tracing::instrument(name = "Login", skip(service, request))]
pub async fn login<C, P, O, N, K>(
    State(service): State<Arc<AuthenticationService<C, P, O, N, K>>>,
    Json(request): Json<LoginHttpRequest>,
) -> Result<Response, ApiError>
where
    C: CredentialStore + 'static,
    P: ProfileStore + 'static,
    O: OtpStore + 'static,
    N: NotificationGateway + 'static,
    K: TokenService + 'static,
{
    let email = Email::try_from(request.email)
        .map_err(|e| ApiError::InvalidInput(e.to_string()))?;
    let password = Password::try_from(request.password)
        .map_err(|e| ApiError::InvalidInput(e.to_string()))?;

    let result = service.login(&email, &password).await;

    Ok(auth_result_response(result, StatusCode::OK).into_response())
}
