//! Repository implementations for database access.
//!
//! Each repository wraps a borrowed SQLx connection, binds parameters for its queries and returns
//! models from [`crate::db::models`]. The connection is owned by the caller, so whatever the
//! repository does, the connection goes back to the pool when the caller drops it.
//!
//! ```ignore
//! use accounts::db::handlers::{Accounts, Repository};
//!
//! async fn example(pool: &sqlx::PgPool) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut conn = pool.acquire().await?;
//!     let mut repo = Accounts::new(&mut conn);
//!
//!     let accounts = repo.list().await?;
//!     Ok(())
//! }
//! ```

pub mod accounts;
pub mod repository;

pub use accounts::Accounts;
pub use repository::Repository;
