//! API request/response models for accounts.

use crate::db::models::accounts::AccountDBResponse;
use crate::types::{AccountId, StudentId};
use serde::{Deserialize, Serialize};

/// Body of create and update requests.
///
/// Missing fields deserialize to empty values so that they are reported by validation
/// (`required`) instead of being rejected by the JSON extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub student_id: Option<StudentIdInput>,
}

/// A student id as submitted: a JSON number, or a string from form-style clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StudentIdInput {
    Number(StudentId),
    Text(String),
}

impl From<StudentId> for StudentIdInput {
    fn from(value: StudentId) -> Self {
        StudentIdInput::Number(value)
    }
}

/// An account as returned by the API. `password` is the stored hash, never the plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: AccountId,
    pub username: String,
    pub password: String,
    pub student_id: StudentId,
}

impl From<AccountDBResponse> for AccountResponse {
    fn from(db: AccountDBResponse) -> Self {
        Self {
            id: db.id,
            username: db.username,
            password: db.password_hash,
            student_id: db.student_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}
