//! Axum route handlers.
//!
//! Handlers only extract the request and delegate to [`crate::store::AccountStore`]; successful
//! envelopes and [`crate::errors::Error`] both render themselves as responses.
//!
//! - [`accounts`]: account CRUD and login

pub mod accounts;
