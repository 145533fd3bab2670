pub mod config;
pub mod notification;
pub mod persistence;
pub mod token;

pub use notification::{
    mock_notification_gateway::MockNotificationGateway,
    postmark_notification_gateway::PostmarkNotificationGateway,
};
pub use persistence::{
    hashmap_credential_store::HashMapCredentialStore, hashmap_otp_store::HashMapOtpStore,
    hashmap_profile_store::HashMapProfileStore,
    postgres_credential_store::PostgresCredentialStore,
    postgres_profile_store::PostgresProfileStore, redis_otp_store::RedisOtpStore,
};
pub use token::jwt_token_service::{JwtConfig, JwtTokenService};
