//! Database record models matching table schemas.
//!
//! Database models are kept distinct from the API models in [`crate::api::models`] so the stored
//! representation (a password *hash*) never leaks into request types by accident.
//!
//! - [`accounts`]: account insert/update requests and the stored account row

pub mod accounts;
