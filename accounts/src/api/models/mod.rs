//! API request and response data models.
//!
//! These define the public HTTP contract and are kept separate from the database models so the
//! two can evolve independently.
//!
//! - [`accounts`]: account request bodies and the account representation
//! - [`responses`]: the `{status, message, data}` envelope and its per-operation payloads

pub mod accounts;
pub mod responses;
