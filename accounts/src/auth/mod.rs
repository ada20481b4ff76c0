//! Credential handling.
//!
//! There is no session or permission layer: this module only turns plaintext passwords into
//! Argon2id PHC strings for storage and checks a plaintext against a stored hash at login.
//!
//! - [`password`]: hashing and verification

pub mod password;
