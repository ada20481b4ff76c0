//! The account store: validation, hashing and persistence behind one envelope-returning API.
//!
//! Every operation checks its own connection out of the pool and holds no other state, so a
//! single [`AccountStore`] can be cloned into every request handler. The pooled connection is
//! returned when it is dropped, which happens on every exit path including `?` returns.
//!
//! Writes run in a fixed order: validate, hash, persist. A validation failure therefore never
//! costs a hash or touches the database, and a hashing failure never touches the database.
//!
//! Two behaviours are lenient:
//!
//! - [`AccountStore::update`] and [`AccountStore::delete`] succeed with `rows_affected = 0` when
//!   no account has the given id.
//! - [`AccountStore::get`] reports a missing id as the persistence "no rows" condition,
//!   [`DbError::NotFound`].

use sqlx::PgPool;
use tracing::{debug, instrument};

use crate::api::models::accounts::{AccountRequest, AccountResponse, LoginRequest};
use crate::api::models::responses::{Envelope, InsertResult, LastInsertId, ListResult, OneResult, RowsAffected, WriteResult};
use crate::auth::password::{self, Argon2Params};
use crate::config::Config;
use crate::db::errors::DbError;
use crate::db::handlers::{Accounts, Repository};
use crate::db::models::accounts::AccountCreateDBRequest;
use crate::errors::{Error, Result};
use crate::types::{AccountId, Operation};
use crate::validation::{ValidatedAccount, Validator};

#[derive(Clone)]
pub struct AccountStore {
    pool: PgPool,
    validator: Validator,
    argon2_params: Argon2Params,
}

impl AccountStore {
    pub fn new(pool: PgPool, validator: Validator, argon2_params: Argon2Params) -> Self {
        Self {
            pool,
            validator,
            argon2_params,
        }
    }

    /// Build a store whose validation rules and hashing cost come from `config`.
    pub fn from_config(pool: PgPool, config: &Config) -> Self {
        Self::new(pool, Validator::new(&config.validation), Argon2Params::from(&config.password))
    }

    /// All accounts, in whatever order the database returns them.
    #[instrument(skip(self), fields(operation = %Operation::List), err)]
    pub async fn list(&self) -> Result<ListResult> {
        let mut conn = self.pool.acquire().await.map_err(|e| Error::Database(e.into()))?;
        let accounts = Accounts::new(&mut conn).list().await?;

        Ok(Envelope::success(accounts.into_iter().map(AccountResponse::from).collect()))
    }

    #[instrument(skip(self), fields(operation = %Operation::Read), err)]
    pub async fn get(&self, id: AccountId) -> Result<OneResult> {
        let mut conn = self.pool.acquire().await.map_err(|e| Error::Database(e.into()))?;
        let account = Accounts::new(&mut conn).get_by_id(id).await?.ok_or(DbError::NotFound)?;

        Ok(Envelope::success(account.into()))
    }

    #[instrument(skip_all, fields(operation = %Operation::Create, username = %request.username), err)]
    pub async fn create(&self, request: &AccountRequest) -> Result<InsertResult> {
        let db_request = self.prepare_write(request).await?;

        let mut conn = self.pool.acquire().await.map_err(|e| Error::Database(e.into()))?;
        let id = Accounts::new(&mut conn).create(&db_request).await?;
        debug!(account_id = id, "Account created");

        Ok(Envelope::success(LastInsertId { last_insert_id: id }))
    }

    /// Overwrite every field of account `id`. The full record is re-validated and the password
    /// re-hashed, exactly as on create.
    #[instrument(skip(self, request), fields(operation = %Operation::Update, username = %request.username), err)]
    pub async fn update(&self, id: AccountId, request: &AccountRequest) -> Result<WriteResult> {
        let db_request = self.prepare_write(request).await?;

        let mut conn = self.pool.acquire().await.map_err(|e| Error::Database(e.into()))?;
        let rows_affected = Accounts::new(&mut conn).update(id, &db_request).await?;
        if rows_affected == 0 {
            debug!("No account matched, nothing updated");
        }

        Ok(Envelope::success(RowsAffected { rows_affected }))
    }

    #[instrument(skip(self), fields(operation = %Operation::Delete), err)]
    pub async fn delete(&self, id: AccountId) -> Result<WriteResult> {
        let mut conn = self.pool.acquire().await.map_err(|e| Error::Database(e.into()))?;
        let rows_affected = Accounts::new(&mut conn).delete(id).await?;

        Ok(Envelope::success(RowsAffected { rows_affected }))
    }

    /// Check a username/password pair against the stored hash.
    ///
    /// Unknown usernames and wrong passwords fail identically.
    #[instrument(skip_all, fields(operation = %Operation::Authenticate, username = %request.username), err)]
    pub async fn authenticate(&self, request: &LoginRequest) -> Result<OneResult> {
        if request.username.is_empty() || request.password.is_empty() {
            return Err(Error::BadRequest {
                message: "Username and password are required".to_string(),
            });
        }

        let account = {
            let mut conn = self.pool.acquire().await.map_err(|e| Error::Database(e.into()))?;
            Accounts::new(&mut conn).get_by_username(&request.username).await?
        };
        let account = account.ok_or(Error::Unauthenticated { message: None })?;

        // Verify on a blocking thread, argon2 is deliberately slow
        let password = request.password.clone();
        let password_hash = account.password_hash.clone();
        let is_valid = tokio::task::spawn_blocking(move || password::verify_string(&password, &password_hash))
            .await
            .map_err(|e| Error::Internal {
                operation: format!("spawn password verification task: {e}"),
            })??;

        if !is_valid {
            return Err(Error::Unauthenticated { message: None });
        }

        Ok(Envelope::success(account.into()))
    }

    /// Validate then hash. Nothing here touches the database.
    async fn prepare_write(&self, request: &AccountRequest) -> Result<AccountCreateDBRequest> {
        let ValidatedAccount {
            username,
            password,
            student_id,
        } = self.validator.validate(request)?;

        let params = self.argon2_params;
        let password_hash = tokio::task::spawn_blocking(move || password::hash_string_with_params(&password, params))
            .await
            .map_err(|e| Error::Internal {
                operation: format!("spawn password hashing task: {e}"),
            })??;

        Ok(AccountCreateDBRequest {
            username,
            password_hash,
            student_id,
        })
    }
}
