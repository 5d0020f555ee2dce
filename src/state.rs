//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use crate::config::Settings;
use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::Services;
use crate::utils::jwt::TokenIssuer;

/// Application state containing all shared services and resources.
///
/// Cloning is cheap since both Services and AsyncDbPool use Arc internally.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Direct access to the database connection pool
    pub db_pool: AsyncDbPool,
    /// Verifies bearer tokens in the auth middleware
    pub tokens: TokenIssuer,
}

impl AppState {
    /// Builds repositories and services on top of the given pool.
    ///
    /// # Example
    /// ```ignore
    /// let pool = establish_async_connection_pool(&settings.database).await?;
    /// let state = AppState::new(pool, &settings);
    /// ```
    pub fn new(pool: AsyncDbPool, settings: &Settings) -> Self {
        let repos = Repositories::new(pool.clone());
        Self::from_parts(repos, pool, settings)
    }

    /// Like [`AppState::new`] but with caller-supplied repositories.
    pub fn from_parts(repos: Repositories, pool: AsyncDbPool, settings: &Settings) -> Self {
        let tokens = TokenIssuer::from(&settings.jwt);
        let services = Services::new(repos, tokens.clone(), settings.password.cost);
        Self {
            services,
            db_pool: pool,
            tokens,
        }
    }
}
