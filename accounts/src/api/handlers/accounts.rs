use crate::api::models::accounts::{AccountRequest, LoginRequest};
use crate::api::models::responses::{InsertResult, ListResult, OneResult, WriteResult};
use crate::errors::Result;
use crate::types::AccountId;
use crate::AppState;
use axum::{
    Json,
    extract::{Path, State},
};

#[tracing::instrument(skip_all)]
pub async fn list_accounts(State(state): State<AppState>) -> Result<ListResult> {
    state.store.list().await
}

#[tracing::instrument(skip_all, fields(account_id = id))]
pub async fn get_account(State(state): State<AppState>, Path(id): Path<AccountId>) -> Result<OneResult> {
    state.store.get(id).await
}

#[tracing::instrument(skip_all)]
pub async fn create_account(State(state): State<AppState>, Json(request): Json<AccountRequest>) -> Result<InsertResult> {
    state.store.create(&request).await
}

#[tracing::instrument(skip_all, fields(account_id = id))]
pub async fn update_account(
    State(state): State<AppState>,
    Path(id): Path<AccountId>,
    Json(request): Json<AccountRequest>,
) -> Result<WriteResult> {
    state.store.update(id, &request).await
}

#[tracing::instrument(skip_all, fields(account_id = id))]
pub async fn delete_account(State(state): State<AppState>, Path(id): Path<AccountId>) -> Result<WriteResult> {
    state.store.delete(id).await
}

#[tracing::instrument(skip_all)]
pub async fn login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> Result<OneResult> {
    state.store.authenticate(&request).await
}

#[cfg(test)]
mod tests {
    use crate::api::models::accounts::AccountResponse;
    use crate::api::models::responses::{Envelope, LastInsertId, RowsAffected};
    use crate::test_utils::{create_test_config, create_test_server, create_unreachable_test_server};
    use axum::http::StatusCode;
    use serde_json::{Value, json};
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_account_lifecycle(pool: PgPool) {
        let server = create_test_server(pool, create_test_config());

        let response = server
            .post("/api/v1/accounts")
            .json(&json!({"username": "alice1", "password": "secret1", "student_id": 42}))
            .await;
        response.assert_status_ok();
        let created: Envelope<LastInsertId> = response.json();
        assert_eq!(created.message, "Success");
        let id = created.data.last_insert_id;

        let response = server.get(&format!("/api/v1/accounts/{id}")).await;
        response.assert_status_ok();
        let fetched: Envelope<AccountResponse> = response.json();
        assert_eq!(fetched.data.username, "alice1");
        assert_eq!(fetched.data.student_id, 42);
        assert_ne!(fetched.data.password, "secret1");

        let response = server
            .put(&format!("/api/v1/accounts/{id}"))
            .json(&json!({"username": "alice2", "password": "secret2", "student_id": "43"}))
            .await;
        response.assert_status_ok();
        let updated: Envelope<RowsAffected> = response.json();
        assert_eq!(updated.data.rows_affected, 1);

        let response = server.get("/api/v1/accounts").await;
        response.assert_status_ok();
        let listed: Envelope<Vec<AccountResponse>> = response.json();
        assert_eq!(listed.data.len(), 1);
        assert_eq!(listed.data[0].username, "alice2");
        assert_eq!(listed.data[0].student_id, 43);

        let response = server.delete(&format!("/api/v1/accounts/{id}")).await;
        response.assert_status_ok();
        let deleted: Envelope<RowsAffected> = response.json();
        assert_eq!(deleted.data.rows_affected, 1);

        let response = server.delete(&format!("/api/v1/accounts/{id}")).await;
        response.assert_status_ok();
        let deleted: Envelope<RowsAffected> = response.json();
        assert_eq!(deleted.data.rows_affected, 0);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_get_missing_account_is_404(pool: PgPool) {
        let server = create_test_server(pool, create_test_config());

        let response = server.get("/api/v1/accounts/999").await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["message"], "Account not found");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_missing_account_reports_zero_rows(pool: PgPool) {
        let server = create_test_server(pool, create_test_config());

        let response = server
            .put("/api/v1/accounts/999")
            .json(&json!({"username": "ghost1", "password": "secret1", "student_id": 1}))
            .await;
        response.assert_status_ok();
        let body: Envelope<RowsAffected> = response.json();
        assert_eq!(body.data.rows_affected, 0);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_duplicate_username_is_409(pool: PgPool) {
        let server = create_test_server(pool, create_test_config());
        let body = json!({"username": "alice1", "password": "secret1", "student_id": 42});

        server.post("/api/v1/accounts").json(&body).await.assert_status_ok();

        let response = server.post("/api/v1/accounts").json(&body).await;
        response.assert_status(StatusCode::CONFLICT);
        let body: Value = response.json();
        assert_eq!(body["message"], "This username is already taken");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_login(pool: PgPool) {
        let server = create_test_server(pool, create_test_config());

        server
            .post("/api/v1/accounts")
            .json(&json!({"username": "alice1", "password": "secret1", "student_id": 42}))
            .await
            .assert_status_ok();

        let response = server
            .post("/api/v1/authentication/login")
            .json(&json!({"username": "alice1", "password": "secret1"}))
            .await;
        response.assert_status_ok();
        let body: Envelope<AccountResponse> = response.json();
        assert_eq!(body.data.username, "alice1");

        let response = server
            .post("/api/v1/authentication/login")
            .json(&json!({"username": "alice1", "password": "wrong-password"}))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_validation_errors_are_reported_per_field() {
        let server = create_unreachable_test_server();

        let response = server
            .post("/api/v1/accounts")
            .json(&json!({"username": "bob", "student_id": "forty-two"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["status"], 400);
        let errors = body["errors"].as_array().unwrap();
        let fields: Vec<&str> = errors.iter().map(|e| e["field"].as_str().unwrap()).collect();
        assert_eq!(fields, vec!["username", "password", "student_id"]);
        assert_eq!(errors[0]["tag"], "min");
        assert_eq!(errors[0]["param"], "5");
        assert_eq!(errors[1]["tag"], "required");
        assert_eq!(errors[2]["tag"], "numeric");
    }

    #[tokio::test]
    async fn test_database_failure_is_500_without_details() {
        let server = create_unreachable_test_server();

        let response = server.get("/api/v1/accounts").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["message"], "Database error occurred");
    }

    #[tokio::test]
    async fn test_non_numeric_path_id_is_rejected() {
        let server = create_unreachable_test_server();

        let response = server.get("/api/v1/accounts/abc").await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
