use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use caregate_core::{Account, AccountId, Principal, Role, TokenService, TokenServiceError};

const TOKEN_USE_ACCESS: &str = "access";
const TOKEN_USE_REFRESH: &str = "refresh";

#[derive(Clone)]
pub struct JwtConfig {
    pub jwt_secret: Secret<String>,
    pub issuer: String,
    pub audience: String,
    pub access_ttl_in_seconds: i64,
    pub refresh_ttl_in_seconds: i64,
}

impl JwtConfig {
    pub fn as_bytes(&self) -> &[u8] {
        self.jwt_secret.expose_secret().as_bytes()
    }
}

/// HMAC-signed JWTs for both token kinds.
///
/// Access and refresh tokens share one signing key and are told apart by the
/// `token_use` claim, which both validation paths check before anything else
/// is extracted. Refresh tokens carry no roles; authorization state is
/// re-read from the account on every refresh.
#[derive(Clone)]
pub struct JwtTokenService {
    config: JwtConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }

    fn generate_token(
        &self,
        account: &Account,
        token_use: &str,
        ttl_seconds: i64,
        roles: Vec<String>,
    ) -> Result<String, TokenServiceError> {
        let delta = chrono::Duration::try_seconds(ttl_seconds).ok_or_else(|| {
            TokenServiceError::SigningError("Failed to create token duration".to_string())
        })?;

        let now = Utc::now();
        let exp = now
            .checked_add_signed(delta)
            .ok_or_else(|| TokenServiceError::SigningError("Duration out of range".to_string()))?
            .timestamp();

        let exp: usize = exp.try_into().map_err(|_| {
            TokenServiceError::SigningError("Failed to cast i64 to usize".to_string())
        })?;
        let iat: usize = now.timestamp().try_into().map_err(|_| {
            TokenServiceError::SigningError("Failed to cast i64 to usize".to_string())
        })?;

        let claims = Claims {
            sub: account.id().to_string(),
            roles,
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            iat,
            exp,
            jti: Uuid::new_v4().to_string(),
            token_use: token_use.to_string(),
        };

        encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.as_bytes()),
        )
        .map_err(|e| TokenServiceError::SigningError(e.to_string()))
    }

    fn decode_claims(&self, token: &str, expected_use: &str) -> Option<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_audience(&[&self.config.audience]);
        validation.leeway = 0;

        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .ok()?;

        if claims.token_use != expected_use {
            return None;
        }
        Some(claims)
    }
}

impl TokenService for JwtTokenService {
    fn generate_access_token(&self, account: &Account) -> Result<String, TokenServiceError> {
        let roles = account
            .roles()
            .iter()
            .map(|role| role.as_str().to_string())
            .collect();

        self.generate_token(
            account,
            TOKEN_USE_ACCESS,
            self.config.access_ttl_in_seconds,
            roles,
        )
    }

    fn generate_refresh_token(&self, account: &Account) -> Result<String, TokenServiceError> {
        self.generate_token(
            account,
            TOKEN_USE_REFRESH,
            self.config.refresh_ttl_in_seconds,
            Vec::new(),
        )
    }

    fn validate_access_token(&self, token: &str) -> Option<Principal> {
        let claims = self.decode_claims(token, TOKEN_USE_ACCESS)?;

        let subject = claims.sub.parse::<AccountId>().ok()?;
        let roles = claims
            .roles
            .iter()
            .map(|role| role.parse::<Role>())
            .collect::<Result<Vec<_>, _>>()
            .ok()?;

        Some(Principal::new(subject, roles))
    }

    fn validate_refresh_token(&self, token: &str) -> Option<AccountId> {
        let claims = self.decode_claims(token, TOKEN_USE_REFRESH)?;
        claims.sub.parse::<AccountId>().ok()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    roles: Vec<String>,
    iss: String,
    aud: String,
    iat: usize,
    exp: usize,
    jti: String,
    token_use: String,
}
