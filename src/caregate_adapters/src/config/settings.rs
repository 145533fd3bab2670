use http::HeaderValue;
use secrecy::Secret;
use serde::Deserialize;

use caregate_core::{Role, RoleError};

use crate::token::jwt_token_service::JwtConfig;

use super::constants;

#[derive(Deserialize, Clone)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    pub jwt: JwtSettings,
    #[serde(default)]
    pub otp: OtpSettings,
    #[serde(default)]
    pub authorization: AuthorizationSettings,
    pub postgres: PostgresSettings,
    pub redis: RedisSettings,
    pub notifications: NotificationSettings,
}

impl Settings {
    /// Layered load: optional `config/base.yaml`, then `CAREGATE_`-prefixed
    /// environment variables with `__` as the section separator.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(config::File::with_name("config/base").required(false))
            .add_source(
                config::Environment::with_prefix("CAREGATE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize::<Settings>()
    }
}

#[derive(Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default)]
    pub allowed_origins: Option<Vec<String>>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            address: default_address(),
            allowed_origins: None,
        }
    }
}

impl ServerSettings {
    pub fn allowed_origins(&self) -> Option<AllowedOrigins> {
        self.allowed_origins.as_ref().map(|origins| {
            AllowedOrigins(
                origins
                    .iter()
                    .filter_map(|origin| origin.parse::<HeaderValue>().ok())
                    .collect(),
            )
        })
    }
}

fn default_address() -> String {
    constants::prod::APP_ADDRESS.to_string()
}

/// CORS origin allow-list, parsed once from the configured strings.
#[derive(Debug, Clone)]
pub struct AllowedOrigins(Vec<HeaderValue>);

impl AllowedOrigins {
    pub fn contains(&self, origin: &HeaderValue) -> bool {
        self.0.contains(origin)
    }
}

#[derive(Deserialize, Clone)]
pub struct JwtSettings {
    pub secret: Secret<String>,
    #[serde(default = "default_issuer")]
    pub issuer: String,
    #[serde(default = "default_audience")]
    pub audience: String,
    #[serde(default = "default_access_ttl")]
    pub access_ttl_in_seconds: i64,
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_in_seconds: i64,
}

impl From<&JwtSettings> for JwtConfig {
    fn from(settings: &JwtSettings) -> Self {
        JwtConfig {
            jwt_secret: settings.secret.clone(),
            issuer: settings.issuer.clone(),
            audience: settings.audience.clone(),
            access_ttl_in_seconds: settings.access_ttl_in_seconds,
            refresh_ttl_in_seconds: settings.refresh_ttl_in_seconds,
        }
    }
}

fn default_issuer() -> String {
    "caregate".to_string()
}

fn default_audience() -> String {
    "caregate-api".to_string()
}

fn default_access_ttl() -> i64 {
    60 * 60
}

fn default_refresh_ttl() -> i64 {
    7 * 24 * 60 * 60
}

#[derive(Deserialize, Clone)]
pub struct OtpSettings {
    #[serde(default = "default_otp_ttl")]
    pub ttl_in_minutes: i64,
}

impl Default for OtpSettings {
    fn default() -> Self {
        Self {
            ttl_in_minutes: default_otp_ttl(),
        }
    }
}

fn default_otp_ttl() -> i64 {
    5
}

#[derive(Deserialize, Clone)]
pub struct AuthorizationSettings {
    #[serde(default = "default_override_roles")]
    pub override_roles: Vec<String>,
}

impl AuthorizationSettings {
    pub fn override_roles(&self) -> Result<Vec<Role>, RoleError> {
        self.override_roles.iter().map(|role| role.parse()).collect()
    }
}

impl Default for AuthorizationSettings {
    fn default() -> Self {
        Self {
            override_roles: default_override_roles(),
        }
    }
}

fn default_override_roles() -> Vec<String> {
    vec![
        Role::Provider.as_str().to_string(),
        Role::Nurse.as_str().to_string(),
        Role::Admin.as_str().to_string(),
    ]
}

#[derive(Deserialize, Clone)]
pub struct PostgresSettings {
    pub url: Secret<String>,
}

#[derive(Deserialize, Clone)]
pub struct RedisSettings {
    pub url: String,
}

#[derive(Deserialize, Clone)]
pub struct NotificationSettings {
    #[serde(default = "default_notification_base_url")]
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    #[serde(default = "default_notification_timeout")]
    pub timeout_in_millis: u64,
}

fn default_notification_base_url() -> String {
    constants::prod::email_client::BASE_URL.to_string()
}

fn default_notification_timeout() -> u64 {
    constants::prod::email_client::TIMEOUT.as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_override_roles_parse() {
        let settings = AuthorizationSettings::default();
        let roles = settings.override_roles().unwrap();
        assert_eq!(roles, vec![Role::Provider, Role::Nurse, Role::Admin]);
    }

    #[test]
    fn test_unknown_override_role_is_rejected() {
        let settings = AuthorizationSettings {
            override_roles: vec!["superuser".to_string()],
        };
        assert!(settings.override_roles().is_err());
    }

    #[test]
    fn test_allowed_origins_matching() {
        let settings = ServerSettings {
            address: "127.0.0.1:0".to_string(),
            allowed_origins: Some(vec!["https://app.example.com".to_string()]),
        };
        let origins = settings.allowed_origins().unwrap();

        assert!(origins.contains(&HeaderValue::from_static("https://app.example.com")));
        assert!(!origins.contains(&HeaderValue::from_static("https://evil.example.com")));
    }
}
