//! Password hashing and verification.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::config::PasswordConfig;
use crate::errors::Error;

/// Argon2 hashing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Params {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Argon2Params {
    fn to_argon2(self) -> Result<Argon2<'static>, Error> {
        let params = Params::new(self.memory_kib, self.iterations, self.parallelism, None).map_err(|e| Error::Hashing {
            reason: format!("invalid argon2 params: {e}"),
        })?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl Default for Argon2Params {
    /// Argon2id RFC recommendations
    fn default() -> Self {
        Self {
            memory_kib: 19456, // 19 MB
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl From<&PasswordConfig> for Argon2Params {
    fn from(config: &PasswordConfig) -> Self {
        Self {
            memory_kib: config.argon2_memory_kib,
            iterations: config.argon2_iterations,
            parallelism: config.argon2_parallelism,
        }
    }
}

/// Hash a password with Argon2id and a fresh random salt.
///
/// The result is a PHC string, so it carries its own salt and parameters.
pub fn hash_string_with_params(input: &str, params: Argon2Params) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = params.to_argon2()?;

    let hash = argon2.hash_password(input.as_bytes(), &salt).map_err(|e| Error::Hashing {
        reason: format!("hash password: {e}"),
    })?;

    Ok(hash.to_string())
}

/// Hash a password using Argon2 with default parameters.
pub fn hash_string(input: &str) -> Result<String, Error> {
    hash_string_with_params(input, Argon2Params::default())
}

/// Verify a password against a stored hash.
///
/// Verification uses the parameters embedded in the hash itself. A malformed stored hash is an
/// error, a mismatch is `Ok(false)`.
pub fn verify_string(input: &str, hash: &str) -> Result<bool, Error> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| Error::Hashing {
        reason: format!("parse stored hash: {e}"),
    })?;

    Ok(Argon2::default().verify_password(input.as_bytes(), &parsed_hash).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Cheap parameters keep the test suite fast
    fn fast_params() -> Argon2Params {
        Argon2Params {
            memory_kib: 128,
            iterations: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn test_string_hashing() {
        let hash = hash_string("secret1").unwrap();

        assert!(!hash.is_empty());
        assert_ne!(hash, "secret1");
        assert!(hash.starts_with("$argon2id$"));

        assert!(verify_string("secret1", &hash).unwrap());
        assert!(!verify_string("secret2", &hash).unwrap());
    }

    #[test]
    fn test_same_input_different_hashes() {
        let hash1 = hash_string_with_params("same_password", fast_params()).unwrap();
        let hash2 = hash_string_with_params("same_password", fast_params()).unwrap();

        // Salted, so the stored forms differ...
        assert_ne!(hash1, hash2);

        // ...but both verify
        assert!(verify_string("same_password", &hash1).unwrap());
        assert!(verify_string("same_password", &hash2).unwrap());
    }

    #[test]
    fn test_invalid_params_are_a_hashing_error() {
        let params = Argon2Params {
            memory_kib: 1,
            iterations: 0,
            parallelism: 1,
        };

        let err = hash_string_with_params("secret1", params).unwrap_err();
        assert!(matches!(err, Error::Hashing { .. }));
    }

    #[test]
    fn test_malformed_stored_hash_is_an_error() {
        assert!(verify_string("secret1", "secret1").is_err());
    }

    #[test]
    fn test_params_from_config() {
        let config = PasswordConfig {
            argon2_memory_kib: 4096,
            argon2_iterations: 3,
            argon2_parallelism: 2,
        };

        assert_eq!(
            Argon2Params::from(&config),
            Argon2Params {
                memory_kib: 4096,
                iterations: 3,
                parallelism: 2,
            }
        );
    }
}
