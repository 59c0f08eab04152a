//! Credential hasher (Argon2id, PHC string format)

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

pub struct CredentialHasher {
    argon2: Argon2<'static>,
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self::new(Argon2::default())
    }
}

impl CredentialHasher {
    pub fn new(argon2: Argon2<'static>) -> Self {
        Self { argon2 }
    }

    /// Hash a password with a fresh random salt
    pub fn hash(&self, password: &str) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        Ok(self
            .argon2
            .hash_password(password.as_bytes(), &salt)?
            .to_string())
    }

    /// Check a password against a stored PHC hash.
    /// A malformed stored hash never verifies.
    pub fn verify(&self, password: &str, stored_hash: &str) -> bool {
        let parsed = match PasswordHash::new(stored_hash) {
            Ok(h) => h,
            Err(e) => {
                tracing::error!("Stored password hash is malformed: {}", e);
                return false;
            }
        };
        self.argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

/// Cheap parameters so tests do not spend seconds per hash.
#[cfg(test)]
pub(crate) fn fast_hasher() -> CredentialHasher {
    use argon2::{Algorithm, Params, Version};
    let params = Params::new(1024, 1, 1, None).expect("valid argon2 params");
    CredentialHasher::new(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = fast_hasher();
        let hash = hasher.hash("correct horse").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert_ne!(hash, "correct horse", "plaintext must never be stored");
        assert!(hasher.verify("correct horse", &hash));
        assert!(!hasher.verify("wrong horse", &hash));
    }

    #[test]
    fn test_same_password_different_salt() {
        let hasher = fast_hasher();
        let a = hasher.hash("pw").unwrap();
        let b = hasher.hash("pw").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_hash_rejected() {
        let hasher = fast_hasher();
        assert!(!hasher.verify("pw", "not-a-phc-string"));
    }
}
