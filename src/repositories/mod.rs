//! Repository layer for data access operations.
//!
//! [`UserStore`] is the seam the service layer depends on; [`UserRepository`]
//! is its PostgreSQL implementation.

#[cfg(test)]
mod memory;
mod store;
mod user_repo;

#[cfg(test)]
pub use memory::InMemoryUserStore;
pub use store::UserStore;
pub use user_repo::UserRepository;

use std::sync::Arc;

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// Cloning is cheap: every member is reference counted.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserStore>,
}

impl Repositories {
    /// Creates a new Repositories instance backed by the given pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool)),
        }
    }

    /// Wraps an already constructed user store.
    pub fn with_user_store(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }
}
