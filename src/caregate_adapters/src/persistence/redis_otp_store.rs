use std::sync::Arc;

use chrono::Utc;
use redis::{Commands, Connection};
use tokio::sync::Mutex;

use caregate_core::{LoginOtpRequest, OtpRequestId, OtpStore, OtpStoreError};

/// Challenge store backed by Redis.
///
/// `take` issues a single GETDEL, so the remove-and-return step is atomic on
/// the server even with several service instances sharing the same Redis.
/// Keys also carry a TTL matching the challenge expiry; the `expires_at`
/// field on the record stays authoritative for the expiry decision.
#[derive(Clone)]
pub struct RedisOtpStore {
    conn: Arc<Mutex<Connection>>,
}

impl RedisOtpStore {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl OtpStore for RedisOtpStore {
    #[tracing::instrument(name = "Storing two-factor challenge in Redis", skip_all)]
    async fn create(&self, request: LoginOtpRequest) -> Result<(), OtpStoreError> {
        let key = get_key(request.id);
        let record = serde_json::to_string(&request)
            .map_err(|e| OtpStoreError::UnexpectedError(e.to_string()))?;
        let ttl_seconds = (request.expires_at - Utc::now()).num_seconds().max(1) as u64;

        let mut conn = self.conn.lock().await;
        conn.set_ex(key, record, ttl_seconds)
            .map_err(|e| OtpStoreError::UnexpectedError(e.to_string()))
    }

    #[tracing::instrument(name = "Consuming two-factor challenge from Redis", skip_all)]
    async fn take(&self, id: OtpRequestId) -> Result<Option<LoginOtpRequest>, OtpStoreError> {
        let key = get_key(id);

        let record: Option<String> = {
            let mut conn = self.conn.lock().await;
            conn.get_del(&key)
                .map_err(|e| OtpStoreError::UnexpectedError(e.to_string()))?
        };

        record
            .map(|record| serde_json::from_str(&record))
            .transpose()
            .map_err(|e| OtpStoreError::UnexpectedError(e.to_string()))
    }
}

// Key prefix to prevent collisions with other data in the same Redis.
const LOGIN_OTP_KEY_PREFIX: &str = "login_otp:";

fn get_key(id: OtpRequestId) -> String {
    format!("{}{}", LOGIN_OTP_KEY_PREFIX, id)
}
