use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use secrecy::Secret;
use serde::Deserialize;

use caregate_application::{AuthenticationService, RegisterRequest};
use caregate_core::{
    CredentialStore, Email, NotificationGateway, OtpStore, Password, ProfileStore, Role,
    TokenService,
};

use super::error::{ApiError, auth_result_response};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterHttpRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
    pub confirm_password: Secret<String>,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

#[tracing::instrument(name = "Register", skip(service, request))]
pub async fn register<C, P, O, N, K>(
    State(service): State<Arc<AuthenticationService<C, P, O, N, K>>>,
    Json(request): Json<RegisterHttpRequest>,
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
    let confirm_password = Password::try_from(request.confirm_password)
        .map_err(|e| ApiError::InvalidInput(e.to_string()))?;
    let role = request
        .role
        .parse::<Role>()
        .map_err(|e| ApiError::InvalidInput(e.to_string()))?;

    let result = service
        .register(RegisterRequest {
            email,
            password,
            confirm_password,
            first_name: request.first_name,
            last_name: request.last_name,
            role,
        })
        .await;

    Ok(auth_result_response(result, StatusCode::CREATED).into_response())
}
