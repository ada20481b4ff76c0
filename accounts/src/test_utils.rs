//! Test utilities shared by the handler and application tests.

use crate::config::{Config, DatabaseConfig, PasswordConfig, PoolSettings};
use axum_test::TestServer;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub fn create_test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        database: DatabaseConfig {
            // Will get overriden by the pool handed to the test
            url: "postgres://localhost/accounts_test".to_string(),
            pool: PoolSettings {
                max_connections: 1,
                min_connections: 0,
                acquire_timeout_secs: 1,
                ..Default::default()
            },
        },
        run_migrations: false,
        // Minimum-cost argon2 keeps the suite fast
        password: PasswordConfig {
            argon2_memory_kib: 128,
            argon2_iterations: 1,
            argon2_parallelism: 1,
        },
        ..Default::default()
    }
}

pub fn create_test_server(pool: PgPool, config: Config) -> TestServer {
    crate::Application::with_pool(config, pool).into_test_server()
}

/// A server whose pool points at a closed port, for tests that must never reach a database.
pub fn create_unreachable_test_server() -> TestServer {
    let config = create_test_config();
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(std::time::Duration::from_millis(250))
        .connect_lazy("postgres://accounts@127.0.0.1:1/accounts")
        .expect("Failed to build lazy pool");

    create_test_server(pool, config)
}
