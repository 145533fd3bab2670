pub mod auth_result;
pub mod authentication_service;
pub mod use_cases;

pub use auth_result::{AuthFailure, AuthResult};
pub use authentication_service::{AuthenticationService, StepUpError};
pub use use_cases::{
    complete_two_factor::CompleteTwoFactorUseCase,
    initiate_two_factor::{InitiateTwoFactorError, InitiateTwoFactorUseCase},
    login::LoginUseCase,
    refresh_token::RefreshTokenUseCase,
    register::{RegisterRequest, RegisterUseCase},
};
