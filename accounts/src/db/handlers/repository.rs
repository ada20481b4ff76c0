//! Base repository trait for database operations.

/// Contains the Repository trait.
///
/// A repository is a data access layer for a single postgres table. It provides methods for
/// creating, reading, updating, deleting and listing entities, each issuing exactly one statement.
use crate::db::errors::Result;

/// Base repository trait providing common database operations
///
/// Writes report what the database reported back (the new id, or a row count) rather than
/// re-reading the row, so callers can tell "no row matched" apart from success themselves.
#[async_trait::async_trait]
pub trait Repository {
    /// The request type for creating entities
    type CreateRequest;

    /// The request type for updating entities
    type UpdateRequest;

    /// The response/DTO type returned by operations
    type Response;

    /// The identifier type for lookups
    type Id: Send + Sync;

    /// Create a new entity, returning its system-assigned id
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Id>;

    /// Get an entity by ID
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>>;

    /// List every entity in the table's natural order
    async fn list(&mut self) -> Result<Vec<Self::Response>>;

    /// Overwrite an entity by ID, returning the number of rows affected
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<u64>;

    /// Delete an entity by ID, returning the number of rows affected
    async fn delete(&mut self, id: Self::Id) -> Result<u64>;
}
