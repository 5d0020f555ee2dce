use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{
    NewUser, PaginationParameters, UpdateUser, User, UserProfile, UserSummary, UsersFilter,
};

/// Persistence operations needed by the user service.
///
/// Implementations must apply identical predicates in [`UserStore::list`] and
/// [`UserStore::count`] for the same filter.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a user whose password is already hashed.
    async fn create(&self, new_user: NewUser) -> AppResult<User>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn find_profile_by_id(&self, id: i32) -> AppResult<Option<UserProfile>>;

    /// One page of users ordered by id.
    async fn list(
        &self,
        filter: &UsersFilter,
        pagination: PaginationParameters,
    ) -> AppResult<Vec<UserSummary>>;

    async fn count(&self, filter: &UsersFilter) -> AppResult<i64>;

    /// Applies `changes` and returns the number of rows touched.
    async fn update(&self, id: i32, changes: UpdateUser) -> AppResult<usize>;
}
