use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use caregate_application::{
    AuthFailure, AuthResult, AuthenticationService, InitiateTwoFactorError, StepUpError,
};
use caregate_core::{
    CredentialStore, Email, NotificationGateway, OtpCode, OtpRequestId, OtpStore, Password,
    ProfileStore, TokenService,
};

use super::error::{ApiError, auth_result_response};

#[derive(Debug, Deserialize)]
pub struct InitiateTwoFactorHttpRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiateTwoFactorHttpResponse {
    pub request_id: OtpRequestId,
}

/// Starts the one-time-code handshake. The code itself travels only through
/// the notification gateway; the response carries the opaque request id the
/// client must echo back.
#[tracing::instrument(name = "Initiate two-factor", skip(service, request))]
pub async fn initiate_two_factor<C, P, O, N, K>(
    State(service): State<Arc<AuthenticationService<C, P, O, N, K>>>,
    Json(request): Json<InitiateTwoFactorHttpRequest>,
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

    match service
        .initiate_two_factor_with_password(&email, &password)
        .await
    {
        Ok(request_id) => Ok((
            StatusCode::OK,
            Json(InitiateTwoFactorHttpResponse { request_id }),
        )
            .into_response()),
        Err(StepUpError::InvalidCredentials) => Ok(auth_result_response(
            AuthResult::failed(AuthFailure::InvalidCredentials),
            StatusCode::OK,
        )
        .into_response()),
        Err(StepUpError::Initiate(InitiateTwoFactorError::NotificationError(detail))) => {
            Err(ApiError::Unexpected(detail))
        }
        Err(StepUpError::Initiate(e)) => Err(ApiError::Unexpected(e.to_string())),
        Err(StepUpError::Unexpected(detail)) => Err(ApiError::Unexpected(detail)),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteTwoFactorHttpRequest {
    pub request_id: String,
    pub code: String,
}

#[tracing::instrument(name = "Complete two-factor", skip(service, request))]
pub async fn complete_two_factor<C, P, O, N, K>(
    State(service): State<Arc<AuthenticationService<C, P, O, N, K>>>,
    Json(request): Json<CompleteTwoFactorHttpRequest>,
) -> Result<Response, ApiError>
where
    C: CredentialStore + 'static,
    P: ProfileStore + 'static,
    O: OtpStore + 'static,
    N: NotificationGateway + 'static,
    K: TokenService + 'static,
{
    let request_id = OtpRequestId::parse(&request.request_id)
        .map_err(|e| ApiError::InvalidInput(e.to_string()))?;
    let code =
        OtpCode::parse(request.code).map_err(|e| ApiError::InvalidInput(e.to_string()))?;

    let result = service.complete_two_factor(request_id, &code).await;

    Ok(auth_result_response(result, StatusCode::OK).into_response())
}
