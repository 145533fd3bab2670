use std::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::account::AccountId;

#[derive(Debug, Error, PartialEq)]
pub enum OtpRequestIdError {
    #[error("Invalid verification request id")]
    InvalidFormat,
}

/// Opaque id handed back from two-factor initiation.
///
/// A fresh v4 UUID carries no guessable relationship to the account id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OtpRequestId(Uuid);

impl OtpRequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(s: &str) -> Result<Self, OtpRequestIdError> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| OtpRequestIdError::InvalidFormat)
    }
}

impl Default for OtpRequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OtpRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum OtpCodeError {
    #[error("Verification code must be six digits")]
    InvalidFormat,
}

/// Six-digit numeric one-time code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    pub fn new() -> Self {
        let code = rand::rng().random_range(100_000..1_000_000);
        Self(code.to_string())
    }

    pub fn parse(s: impl Into<String>) -> Result<Self, OtpCodeError> {
        let code = s.into();
        if code.len() != 6 || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(OtpCodeError::InvalidFormat);
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// One-way digest of the code. The plaintext never reaches a store.
    pub fn hash(&self) -> OtpCodeHash {
        OtpCodeHash(Sha256::digest(self.0.as_bytes()).into())
    }
}

impl Default for OtpCode {
    fn default() -> Self {
        Self::new()
    }
}

/// SHA-256 digest of an `OtpCode`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpCodeHash([u8; 32]);

impl OtpCodeHash {
    /// Compares against a candidate code without short-circuiting on the
    /// first differing byte.
    pub fn matches(&self, candidate: &OtpCode) -> bool {
        let other = candidate.hash();
        self.0
            .iter()
            .zip(other.0.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

impl Serialize for OtpCodeHash {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for OtpCodeHash {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        let bytes = hex::decode(&encoded).map_err(serde::de::Error::custom)?;
        let digest: [u8; 32] = bytes
            .try_into()
            .map_err(|_| serde::de::Error::custom("expected a 32-byte digest"))?;
        Ok(Self(digest))
    }
}

/// Ephemeral two-factor challenge.
///
/// The record is removed from its store on the first resolution attempt,
/// whatever the outcome - a wrong or late guess does not leave it alive for
/// a second try.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginOtpRequest {
    pub id: OtpRequestId,
    pub account_id: AccountId,
    pub code_hash: OtpCodeHash,
    pub expires_at: DateTime<Utc>,
}

impl LoginOtpRequest {
    pub fn new(account_id: AccountId, code: &OtpCode, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: OtpRequestId::new(),
            account_id,
            code_hash: code.hash(),
            expires_at,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_generated_code_is_six_digits() {
        for _ in 0..100 {
            let code = OtpCode::new();
            assert_eq!(code.as_str().len(), 6);
            assert!(code.as_str().chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_parse_rejects_short_code() {
        assert_eq!(OtpCode::parse("12345").unwrap_err(), OtpCodeError::InvalidFormat);
    }

    #[test]
    fn test_parse_rejects_non_numeric_code() {
        assert_eq!(OtpCode::parse("12a456").unwrap_err(), OtpCodeError::InvalidFormat);
    }

    #[test]
    fn test_hash_matches_same_code() {
        let code = OtpCode::parse("123456").unwrap();
        assert!(code.hash().matches(&OtpCode::parse("123456").unwrap()));
    }

    #[test]
    fn test_hash_rejects_different_code() {
        let code = OtpCode::parse("123456").unwrap();
        assert!(!code.hash().matches(&OtpCode::parse("123457").unwrap()));
    }

    #[test]
    fn test_hash_serde_round_trip() {
        let hash = OtpCode::parse("654321").unwrap().hash();
        let json = serde_json::to_string(&hash).unwrap();
        let back: OtpCodeHash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hash);
    }

    #[test]
    fn test_request_expiry_is_a_strict_bound() {
        let now = Utc::now();
        let request = LoginOtpRequest::new(AccountId::new(), &OtpCode::new(), now);
        assert!(!request.is_expired(now));
        assert!(request.is_expired(now + Duration::seconds(1)));
    }
}
