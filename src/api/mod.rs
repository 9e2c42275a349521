//! API module
//!
//! HTTP API endpoints, middleware, and shared state.

pub mod middleware;
pub mod routes;

pub use routes::create_router;

use sqlx::PgPool;

use crate::config::Config;

/// Shared state for all request handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
}

impl AppState {
    pub fn new(pool: PgPool, config: Config) -> Self {
        Self { pool, config }
    }
}
