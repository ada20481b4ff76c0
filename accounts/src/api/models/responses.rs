//! The response envelope shared by every successful account operation.
//!
//! Every success serializes as `{"status": <code>, "message": "Success", "data": <payload>}`.
//! The payload type is fixed per operation, so each operation gets its own alias.

use crate::api::models::accounts::AccountResponse;
use crate::types::AccountId;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

pub const SUCCESS_MESSAGE: &str = "Success";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: u16,
    pub message: String,
    pub data: T,
}

impl<T> Envelope<T> {
    /// A 200 "Success" envelope around `data`.
    pub fn success(data: T) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            message: SUCCESS_MESSAGE.to_string(),
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

/// Payload of a create: the id the database assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastInsertId {
    pub last_insert_id: AccountId,
}

/// Payload of an update or delete. Zero means no row had the given id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowsAffected {
    pub rows_affected: u64,
}

pub type ListResult = Envelope<Vec<AccountResponse>>;
pub type OneResult = Envelope<AccountResponse>;
pub type InsertResult = Envelope<LastInsertId>;
pub type WriteResult = Envelope<RowsAffected>;
