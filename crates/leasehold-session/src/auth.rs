//! Credential verification for the admin login.
//!
//! The session manager doesn't know what a "correct password" is. It asks
//! a [`CredentialVerifier`]. The shipped implementation,
//! [`HashedCredential`], holds a salted SHA-256 digest of the admin
//! password (never the password itself) and compares with constant-time
//! equality, so neither the secret nor how much of it matched leaks through
//! timing.
//!
//! Semantics are exact-match: only the one configured username/password
//! pair verifies. There is no rate limiting or lockout at this layer.

use std::fmt;

use rand::Rng;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::SessionError;

/// Environment variable holding the admin username.
pub const ADMIN_USERNAME_ENV: &str = "LEASEHOLD_ADMIN_USERNAME";

/// Environment variable holding the encoded admin password hash.
pub const ADMIN_PASSWORD_HASH_ENV: &str = "LEASEHOLD_ADMIN_PASSWORD_HASH";

const SALT_LEN: usize = 16;
const DIGEST_LEN: usize = 32;

/// Checks a username/password pair against a stored reference.
///
/// # Trait bounds
///
/// - `Send + Sync + 'static` → the verifier lives inside the session
///   manager, which may be shared with a background recheck task.
///
/// # Example
///
/// ```rust
/// use leasehold_session::CredentialVerifier;
///
/// /// Rejects everyone. Handy for a maintenance window.
/// struct LockedOut;
///
/// impl CredentialVerifier for LockedOut {
///     fn verify(&self, _username: &str, _password: &str) -> bool {
///         false
///     }
/// }
///
/// assert!(!LockedOut.verify("admin", "anything"));
/// ```
pub trait CredentialVerifier: Send + Sync + 'static {
    /// Returns `true` iff `username` and `password` are exactly the
    /// reference credential.
    fn verify(&self, username: &str, password: &str) -> bool;
}

// ---------------------------------------------------------------------------
// HashedCredential
// ---------------------------------------------------------------------------

/// The admin's reference credential, hashed at rest.
///
/// Stored as `SHA-256(salt ‖ password)` with a random 16-byte salt. The
/// encoded form used in configuration is `"<salt-hex>$<digest-hex>"`.
#[derive(Clone)]
pub struct HashedCredential {
    username: String,
    salt: [u8; SALT_LEN],
    digest: [u8; DIGEST_LEN],
}

impl HashedCredential {
    /// Hashes `password` under a fresh random salt.
    pub fn new(username: impl Into<String>, password: &str) -> Self {
        let salt: [u8; SALT_LEN] = rand::rng().random();
        Self::with_salt(username, password, salt)
    }

    /// Hashes `password` under the given salt. Deterministic; mostly
    /// useful for fixtures.
    pub fn with_salt(
        username: impl Into<String>,
        password: &str,
        salt: [u8; SALT_LEN],
    ) -> Self {
        Self {
            username: username.into(),
            digest: digest(&salt, password),
            salt,
        }
    }

    /// Parses an encoded hash produced by [`encode`](Self::encode).
    ///
    /// # Errors
    /// Returns [`SessionError::InvalidCredential`] if the string isn't
    /// `<32 hex chars>$<64 hex chars>`.
    pub fn parse(
        username: impl Into<String>,
        encoded: &str,
    ) -> Result<Self, SessionError> {
        let (salt_hex, digest_hex) = encoded.trim().split_once('$').ok_or_else(|| {
            SessionError::InvalidCredential("expected <salt>$<digest>".into())
        })?;

        let salt = decode_fixed::<SALT_LEN>(salt_hex, "salt")?;
        let digest = decode_fixed::<DIGEST_LEN>(digest_hex, "digest")?;

        Ok(Self {
            username: username.into(),
            salt,
            digest,
        })
    }

    /// Reads the credential from `LEASEHOLD_ADMIN_USERNAME` and
    /// `LEASEHOLD_ADMIN_PASSWORD_HASH`.
    ///
    /// # Errors
    /// - [`SessionError::MissingEnv`] if either variable is unset
    /// - [`SessionError::InvalidCredential`] if the hash is malformed
    pub fn from_env() -> Result<Self, SessionError> {
        let username = std::env::var(ADMIN_USERNAME_ENV)
            .map_err(|_| SessionError::MissingEnv(ADMIN_USERNAME_ENV))?;
        let encoded = std::env::var(ADMIN_PASSWORD_HASH_ENV)
            .map_err(|_| SessionError::MissingEnv(ADMIN_PASSWORD_HASH_ENV))?;
        Self::parse(username, &encoded)
    }

    /// Returns the encoded `"<salt-hex>$<digest-hex>"` form.
    pub fn encode(&self) -> String {
        format!("{}${}", hex::encode(self.salt), hex::encode(self.digest))
    }

    /// The admin username this credential belongs to.
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl CredentialVerifier for HashedCredential {
    fn verify(&self, username: &str, password: &str) -> bool {
        let candidate = digest(&self.salt, password);

        // Both comparisons always run; `&` on `Choice` doesn't short-circuit.
        let user_ok = self.username.as_bytes().ct_eq(username.as_bytes());
        let pass_ok = self.digest.as_slice().ct_eq(candidate.as_slice());

        (user_ok & pass_ok).into()
    }
}

impl fmt::Debug for HashedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedCredential")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

fn digest(salt: &[u8; SALT_LEN], password: &str) -> [u8; DIGEST_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());

    let mut out = [0u8; DIGEST_LEN];
    out.copy_from_slice(&hasher.finalize());
    out
}

fn decode_fixed<const N: usize>(
    hex_str: &str,
    what: &str,
) -> Result<[u8; N], SessionError> {
    let bytes = hex::decode(hex_str)
        .map_err(|e| SessionError::InvalidCredential(format!("{what}: {e}")))?;
    bytes.try_into().map_err(|b: Vec<u8>| {
        SessionError::InvalidCredential(format!(
            "{what}: expected {N} bytes, got {}",
            b.len()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> HashedCredential {
        HashedCredential::with_salt("admin", "s3cret!", [7u8; SALT_LEN])
    }

    #[test]
    fn test_verify_exact_pair_succeeds() {
        assert!(admin().verify("admin", "s3cret!"));
    }

    #[test]
    fn test_verify_wrong_password_fails() {
        assert!(!admin().verify("admin", "s3cret"));
        assert!(!admin().verify("admin", "S3CRET!"));
        assert!(!admin().verify("admin", ""));
    }

    #[test]
    fn test_verify_wrong_username_fails() {
        assert!(!admin().verify("Admin", "s3cret!"));
        assert!(!admin().verify("admin ", "s3cret!"));
        assert!(!admin().verify("", "s3cret!"));
    }

    #[test]
    fn test_verify_swapped_fields_fails() {
        assert!(!admin().verify("s3cret!", "admin"));
    }

    #[test]
    fn test_new_uses_random_salt() {
        let a = HashedCredential::new("admin", "pw");
        let b = HashedCredential::new("admin", "pw");

        assert_ne!(a.encode(), b.encode(), "salts should differ");
        assert!(a.verify("admin", "pw"));
        assert!(b.verify("admin", "pw"));
    }

    #[test]
    fn test_parse_encode_preserves_verification() {
        let original = HashedCredential::new("admin", "correct horse");

        let parsed = HashedCredential::parse("admin", &original.encode()).unwrap();

        assert!(parsed.verify("admin", "correct horse"));
        assert!(!parsed.verify("admin", "battery staple"));
    }

    #[test]
    fn test_parse_missing_separator_returns_invalid() {
        let result = HashedCredential::parse("admin", "deadbeef");
        assert!(matches!(result, Err(SessionError::InvalidCredential(_))));
    }

    #[test]
    fn test_parse_bad_hex_returns_invalid() {
        let result = HashedCredential::parse("admin", "zz$zz");
        assert!(matches!(result, Err(SessionError::InvalidCredential(_))));
    }

    #[test]
    fn test_parse_wrong_lengths_returns_invalid() {
        let short_salt = format!("{}${}", "ab".repeat(8), "cd".repeat(32));
        let short_digest = format!("{}${}", "ab".repeat(16), "cd".repeat(31));

        assert!(HashedCredential::parse("admin", &short_salt).is_err());
        assert!(HashedCredential::parse("admin", &short_digest).is_err());
    }

    #[test]
    fn test_debug_does_not_print_digest() {
        let cred = admin();
        let debug = format!("{cred:?}");

        assert!(debug.contains("admin"));
        assert!(!debug.contains(&hex::encode(cred.digest)));
    }
}
