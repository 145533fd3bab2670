use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher, SaltString, rand_core},
};
use secrecy::{ExposeSecret, Secret};

use caregate_core::Password;

/// Shared policy checks applied by every credential store before hashing.
/// Returns human-readable reasons, empty when the password is acceptable.
pub(crate) fn policy_violations(password: &Password) -> Vec<String> {
    let raw = password.as_ref().expose_secret();
    let mut reasons = Vec::new();

    if !raw.chars().any(|c| c.is_ascii_digit()) {
        reasons.push("Password must contain at least one digit".to_string());
    }
    if !raw.chars().any(|c| c.is_alphabetic()) {
        reasons.push("Password must contain at least one letter".to_string());
    }

    reasons
}

#[tracing::instrument(name = "Verify password hash", skip_all)]
pub(crate) async fn verify_password_hash(
    expected_password_hash: Secret<String>,
    password_candidate: Password,
) -> Result<bool, String> {
    let current_span: tracing::Span = tracing::Span::current();
    let result = tokio::task::spawn_blocking(move || {
        current_span.in_scope(|| {
            let expected_password_hash: PasswordHash<'_> =
                PasswordHash::new(expected_password_hash.expose_secret())
                    .map_err(|e| e.to_string())?;

            match argon2_hasher()?.verify_password(
                password_candidate.as_ref().expose_secret().as_bytes(),
                &expected_password_hash,
            ) {
                Ok(()) => Ok(true),
                Err(argon2::password_hash::Error::Password) => Ok(false),
                Err(e) => Err(e.to_string()),
            }
        })
    })
    .await
    .map_err(|e| e.to_string())?;

    result
}

#[tracing::instrument(name = "Computing password hash", skip_all)]
pub(crate) async fn compute_password_hash(password: Password) -> Result<Secret<String>, String> {
    let current_span: tracing::Span = tracing::Span::current();

    let result = tokio::task::spawn_blocking(move || {
        current_span.in_scope(move || {
            let salt: SaltString = SaltString::generate(rand_core::OsRng);
            argon2_hasher()?
                .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                .map(|h| Secret::from(h.to_string()))
                .map_err(|e| e.to_string())
        })
    })
    .await
    .map_err(|e| e.to_string())?;

    result
}

fn argon2_hasher() -> Result<Argon2<'static>, String> {
    Ok(Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
    ))
}
