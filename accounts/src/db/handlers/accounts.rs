//! Database repository for accounts.

use crate::db::{
    errors::Result,
    handlers::repository::Repository,
    models::accounts::{AccountCreateDBRequest, AccountDBResponse, AccountUpdateDBRequest},
};
use crate::types::{AccountId, StudentId};
use sqlx::{FromRow, PgConnection};
use tracing::instrument;

// Database entity model. Field order matches the table's column order.
#[derive(Debug, Clone, FromRow)]
struct Account {
    pub id: AccountId,
    pub username: String,
    pub password: String,
    pub student_id: StudentId,
}

impl From<Account> for AccountDBResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            password_hash: account.password,
            student_id: account.student_id,
        }
    }
}

pub struct Accounts<'c> {
    db: &'c mut PgConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for Accounts<'c> {
    type CreateRequest = AccountCreateDBRequest;
    type UpdateRequest = AccountUpdateDBRequest;
    type Response = AccountDBResponse;
    type Id = AccountId;

    #[instrument(skip(self, request), fields(username = %request.username), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Id> {
        let id: AccountId = sqlx::query_scalar("INSERT INTO accounts (username, password, student_id) VALUES ($1, $2, $3) RETURNING id")
            .bind(&request.username)
            .bind(&request.password_hash)
            .bind(request.student_id)
            .fetch_one(&mut *self.db)
            .await?;

        Ok(id)
    }

    #[instrument(skip(self), fields(account_id = id), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(account.map(AccountDBResponse::from))
    }

    #[instrument(skip(self), err)]
    async fn list(&mut self) -> Result<Vec<Self::Response>> {
        // fetch_all fails the whole call if any row fails to decode
        let accounts = sqlx::query_as::<_, Account>("SELECT * FROM accounts")
            .fetch_all(&mut *self.db)
            .await?;

        Ok(accounts.into_iter().map(AccountDBResponse::from).collect())
    }

    #[instrument(skip(self, request), fields(account_id = id, username = %request.username), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<u64> {
        let result = sqlx::query("UPDATE accounts SET username = $1, password = $2, student_id = $3 WHERE id = $4")
            .bind(&request.username)
            .bind(&request.password_hash)
            .bind(request.student_id)
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self), fields(account_id = id), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<u64> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1").bind(id).execute(&mut *self.db).await?;

        Ok(result.rows_affected())
    }
}

impl<'c> Accounts<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, username), err)]
    pub async fn get_by_username(&mut self, username: &str) -> Result<Option<AccountDBResponse>> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE username = $1")
            .bind(username)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(account.map(AccountDBResponse::from))
    }
}
