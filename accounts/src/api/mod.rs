//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers
//! - **[`models`]**: Request/response data structures
//!
//! All routes live under `/api/v1`:
//!
//! - **Accounts** (`/accounts`, `/accounts/{id}`): list, create, get, update, delete
//! - **Authentication** (`/authentication/login`): check a username/password pair

pub mod handlers;
pub mod models;
