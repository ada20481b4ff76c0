//! # accounts: a CRUD service for student accounts
//!
//! `accounts` stores one kind of record, an account with a username, a password and a student id,
//! in a single PostgreSQL table and exposes it over a small REST API. Every successful call
//! answers with the same envelope:
//!
//! ```json
//! {"status": 200, "message": "Success", "data": ...}
//! ```
//!
//! ## Architecture
//!
//! The HTTP layer is [Axum](https://github.com/tokio-rs/axum); persistence is PostgreSQL through
//! SQLx. A request flows through four layers:
//!
//! 1. **Handlers** ([`api::handlers`]) extract the path and JSON body.
//! 2. **The store** ([`store::AccountStore`]) validates writes ([`validation`]), hashes passwords
//!    with Argon2id ([`auth::password`]) and wraps results in the envelope.
//! 3. **Repositories** ([`db::handlers`]) issue exactly one SQL statement per call on a
//!    connection borrowed from the pool.
//! 4. **Errors** ([`errors::Error`]) render as a JSON `{status, message}` body with the matching
//!    HTTP status; validation failures also list each failed field.
//!
//! There is no cache and no shared mutable state: concurrent requests only meet in the
//! connection pool and in PostgreSQL.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use accounts::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = accounts::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     accounts::telemetry::init_telemetry(config.enable_otel_export)?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     }).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod store;
pub mod telemetry;
pub mod types;
pub mod validation;

#[cfg(test)]
mod test_utils;

use axum::{
    Router,
    routing::{get, post},
};
use bon::Builder;
use sqlx::{PgPool, postgres::PgPoolOptions};
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{Level, debug, info, instrument};

pub use config::Config;
use store::AccountStore;

/// Shared state handed to every handler.
///
/// Cloning is cheap: the pool is reference counted and the store holds only the pool and its
/// (immutable) validation and hashing settings.
///
/// ```ignore
/// let state = AppState::builder()
///     .db(pool.clone())
///     .store(AccountStore::from_config(pool, &config))
///     .config(config)
///     .build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    pub store: AccountStore,
}

/// Get the accounts database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Connect the main pool using the configured pool settings.
#[instrument(skip_all, err)]
async fn connect_pool(config: &Config) -> anyhow::Result<PgPool> {
    let settings = &config.database.pool;
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(settings.acquire_timeout())
        .idle_timeout(settings.idle_timeout())
        .max_lifetime(settings.max_lifetime())
        .connect(&config.database.url)
        .await?;

    Ok(pool)
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/accounts", get(api::handlers::accounts::list_accounts).post(api::handlers::accounts::create_account))
        .route(
            "/accounts/{id}",
            get(api::handlers::accounts::get_account)
                .put(api::handlers::accounts::update_account)
                .delete(api::handlers::accounts::delete_account),
        )
        .route("/authentication/login", post(api::handlers::accounts::login));

    Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .nest("/api/v1", api_routes)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance: connect, migrate, build the router.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting accounts service with configuration: {:#?}", config);

        let pool = connect_pool(&config).await?;

        if config.run_migrations {
            info!("Running database migrations");
            migrator().run(&pool).await?;
        }

        Ok(Self::with_pool(config, pool))
    }

    /// Create an application around an existing pool. Migrations are the caller's business.
    pub fn with_pool(config: Config, pool: PgPool) -> Self {
        let state = AppState::builder()
            .db(pool.clone())
            .store(AccountStore::from_config(pool.clone(), &config))
            .config(config.clone())
            .build();

        Self {
            router: build_router(state),
            config,
            pool,
        }
    }

    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!("Accounts service listening on http://{}", bind_addr);

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_config, create_test_server, create_unreachable_test_server};

    #[tokio::test]
    async fn test_healthz() {
        let server = create_unreachable_test_server();

        let response = server.get("/healthz").await;
        response.assert_status_ok();
        response.assert_text("OK");
    }

    #[tokio::test]
    async fn test_router_serves_healthz_directly() {
        use axum::body::Body;
        use axum::http::{Request, StatusCode};
        use tower::ServiceExt;

        let config = create_test_config();
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://accounts@127.0.0.1:1/accounts")
            .unwrap();
        let state = AppState::builder()
            .db(pool.clone())
            .store(AccountStore::from_config(pool, &config))
            .config(config)
            .build();

        let response = build_router(state)
            .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let server = create_unreachable_test_server();

        server.get("/api/v1/nope").await.assert_status_not_found();
    }

    #[sqlx::test(migrations = false)]
    #[test_log::test]
    async fn test_migrator_creates_accounts_table(pool: PgPool) {
        migrator().run(&pool).await.unwrap();

        let columns: Vec<String> =
            sqlx::query_scalar("SELECT column_name::text FROM information_schema.columns WHERE table_name = 'accounts' ORDER BY ordinal_position")
                .fetch_all(&pool)
                .await
                .unwrap();

        assert_eq!(columns, vec!["id", "username", "password", "student_id"]);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_routes_are_mounted_under_api_v1(pool: PgPool) {
        let server = create_test_server(pool, create_test_config());

        let response = server.get("/api/v1/accounts").await;
        response.assert_status_ok();
        response.assert_json(&serde_json::json!({"status": 200, "message": "Success", "data": []}));

        server.get("/accounts").await.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_application_new_fails_without_database() {
        let mut config = create_test_config();
        config.database.url = "postgres://nobody@127.0.0.1:1/accounts".to_string();

        assert!(Application::new(config).await.is_err());
    }
}
