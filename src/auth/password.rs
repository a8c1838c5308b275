//! Argon2id password hashing. Every call runs on tokio's blocking pool so a
//! slow hash never stalls the request executor.

use std::sync::OnceLock;

use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

/// Hash checked when the email is unknown, so that path costs one verify too.
static DECOY_HASH: OnceLock<String> = OnceLock::new();

fn phc_hash(plain: &[u8]) -> Result<String, password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default().hash_password(plain, &salt)?.to_string())
}

fn phc_verify(plain: &[u8], phc: &str) -> Result<bool, password_hash::Error> {
    let parsed = PasswordHash::new(phc)?;
    match Argon2::default().verify_password(plain, &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

fn decoy_hash() -> &'static str {
    DECOY_HASH.get_or_init(|| {
        phc_hash(b"decoy-credential").unwrap_or_else(|e| {
            error!(error = %e, "argon2 decoy hash error");
            String::new()
        })
    })
}

/// Fresh random salt, fixed default cost.
pub async fn hash_password(plain: String) -> anyhow::Result<String> {
    tokio::task::spawn_blocking(move || phc_hash(plain.as_bytes()))
        .await?
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!("argon2 hash: {e}")
        })
}

/// `Ok(false)` on mismatch; errors only when `phc` is not a valid PHC string.
pub async fn verify_password(plain: String, phc: String) -> anyhow::Result<bool> {
    tokio::task::spawn_blocking(move || phc_verify(plain.as_bytes(), &phc))
        .await?
        .map_err(|e| {
            error!(error = %e, "argon2 parse hash error");
            anyhow::anyhow!("argon2 verify: {e}")
        })
}

/// Spend one verification on the decoy hash. The outcome is irrelevant.
pub async fn verify_decoy(plain: String) {
    let _ = tokio::task::spawn_blocking(move || phc_verify(plain.as_bytes(), decoy_hash())).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn accepts_matching_password_only() {
        let phc = hash_password("tr0ub4dor&3".into()).await.unwrap();
        assert!(verify_password("tr0ub4dor&3".into(), phc.clone()).await.unwrap());
        assert!(!verify_password("Tr0ub4dor&3".into(), phc).await.unwrap());
    }

    #[tokio::test]
    async fn rejects_garbage_stored_hash() {
        assert!(verify_password("pw".into(), "$plaintext$pw".into()).await.is_err());
    }

    #[tokio::test]
    async fn salts_differ_for_same_password() {
        let a = hash_password("secret1".into()).await.unwrap();
        let b = hash_password("secret1".into()).await.unwrap();
        assert_ne!(a, b);
        assert_ne!(a, "secret1");
        assert!(a.starts_with("$argon2id$"));
    }

    #[test]
    fn decoy_is_a_real_argon2_hash() {
        let decoy = decoy_hash();
        assert!(decoy.starts_with("$argon2id$"));
        assert!(matches!(phc_verify(b"decoy-guess", decoy), Ok(false)));
    }
}
