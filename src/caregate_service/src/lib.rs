pub mod identity_service;
pub mod routes;
pub mod tracing;

pub use identity_service::IdentityService;
pub use routes::error::ApiError;
