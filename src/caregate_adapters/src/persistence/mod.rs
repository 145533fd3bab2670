pub mod hashmap_credential_store;
pub mod hashmap_otp_store;
pub mod hashmap_profile_store;
pub(crate) mod password_hashing;
pub mod postgres_credential_store;
pub mod postgres_profile_store;
pub mod redis_otp_store;
