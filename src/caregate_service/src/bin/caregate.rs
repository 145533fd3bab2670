use std::sync::Arc;

use chrono::Duration;
use color_eyre::eyre::Result;
use redis::Client;
use reqwest::Client as HttpClient;
use secrecy::{ExposeSecret, Secret};
use sqlx::postgres::PgPoolOptions;
use tokio::sync::Mutex;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use caregate_adapters::config::Settings;
use caregate_adapters::{
    JwtConfig, JwtTokenService, PostgresCredentialStore, PostgresProfileStore,
    PostmarkNotificationGateway, RedisOtpStore,
};
use caregate_core::Email;
use caregate_service::IdentityService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    color_eyre::install().expect("Failed to install color_eyre");
    init_tracing().expect("Failed to initialize tracing");

    // Load configuration
    let config = Settings::load()?;

    // Setup database connection pool
    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(config.postgres.url.expose_secret())
        .await?;

    // Setup Redis connection
    let redis_client = Client::open(config.redis.url.clone())?;
    let redis_conn = Arc::new(Mutex::new(redis_client.get_connection()?));

    // Create stores
    let credential_store = PostgresCredentialStore::new(pg_pool.clone());
    let profile_store = PostgresProfileStore::new(pg_pool);
    let otp_store = RedisOtpStore::new(redis_conn);

    // Create notification gateway
    let http_client = HttpClient::builder()
        .timeout(std::time::Duration::from_millis(
            config.notifications.timeout_in_millis,
        ))
        .build()?;

    let notification_gateway = PostmarkNotificationGateway::new(
        config.notifications.base_url.clone(),
        Email::try_from(Secret::from(config.notifications.sender.clone()))?,
        config.notifications.auth_token.clone(),
        http_client,
    );

    // Create token service
    let token_service = JwtTokenService::new(JwtConfig::from(&config.jwt));

    let identity_service = IdentityService::new(
        credential_store,
        profile_store,
        otp_store,
        notification_gateway,
        token_service,
        Duration::minutes(config.otp.ttl_in_minutes),
    );

    let allowed_origins = config.server.allowed_origins();

    let listener = tokio::net::TcpListener::bind(&config.server.address).await?;
    tracing::info!("Starting identity service...");

    identity_service
        .run_standalone(listener, allowed_origins)
        .await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
