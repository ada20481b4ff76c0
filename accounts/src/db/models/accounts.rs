//! Database models for accounts.

use crate::types::{AccountId, StudentId};

/// Database request for inserting an account.
///
/// Only ever built from input that already passed validation, with the password already hashed.
#[derive(Debug, Clone)]
pub struct AccountCreateDBRequest {
    pub username: String,
    pub password_hash: String,
    pub student_id: StudentId,
}

/// Database request for overwriting an account. Every column except `id` is rewritten.
pub type AccountUpdateDBRequest = AccountCreateDBRequest;

/// Database response for an account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountDBResponse {
    pub id: AccountId,
    pub username: String,
    pub password_hash: String,
    pub student_id: StudentId,
}
