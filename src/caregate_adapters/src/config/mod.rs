pub mod constants;
pub mod settings;

pub use settings::{
    AllowedOrigins, AuthorizationSettings, JwtSettings, NotificationSettings, OtpSettings,
    PostgresSettings, RedisSettings, ServerSettings, Settings,
};
