//! User repository for async database operations.
//!
//! Provides CRUD operations for the users table using diesel_async.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::Bool;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult, DatabaseErrorConverter};
use crate::models::{
    NewUser, PaginationParameters, UpdateUser, User, UserProfile, UserSummary, UsersFilter,
};
use crate::repositories::UserStore;
use crate::schema::users;

type UserPredicate = Box<dyn BoxableExpression<users::table, Pg, SqlType = Bool>>;

/// User repository holding an async connection pool.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap.
#[derive(Clone)]
pub struct UserRepository {
    pool: AsyncDbPool,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Translates the listing filter into `LIKE '%value%'` predicates.
    fn predicates(filter: &UsersFilter) -> Vec<UserPredicate> {
        let mut predicates: Vec<UserPredicate> = Vec::new();

        if let Some(value) = &filter.first_name {
            predicates.push(Box::new(users::first_name.like(contains_pattern(value))));
        }
        if let Some(value) = &filter.last_name {
            predicates.push(Box::new(users::last_name.like(contains_pattern(value))));
        }
        if let Some(value) = &filter.email {
            predicates.push(Box::new(users::email.like(contains_pattern(value))));
        }

        predicates
    }
}

/// Wraps `value` in `%` after escaping LIKE metacharacters.
pub(crate) fn contains_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl UserStore for UserRepository {
    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(users::table)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "insert user"))
    }

    async fn find_by_email(&self, user_email: &str) -> AppResult<Option<User>> {
        let mut conn = self.pool.get().await?;

        users::table
            .filter(users::email.eq(user_email))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn find_profile_by_id(&self, user_id: i32) -> AppResult<Option<UserProfile>> {
        let mut conn = self.pool.get().await?;

        users::table
            .filter(users::id.eq(user_id))
            .select(UserProfile::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn list(
        &self,
        filter: &UsersFilter,
        pagination: PaginationParameters,
    ) -> AppResult<Vec<UserSummary>> {
        let mut conn = self.pool.get().await?;

        let mut query = users::table
            .select(UserSummary::as_select())
            .order(users::id.asc())
            .into_boxed();
        for predicate in Self::predicates(filter) {
            query = query.filter(predicate);
        }

        query
            .offset(pagination.skip)
            .limit(pagination.per_page_number)
            .load(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "list users"))
    }

    async fn count(&self, filter: &UsersFilter) -> AppResult<i64> {
        let mut conn = self.pool.get().await?;

        let mut query = users::table.count().into_boxed();
        for predicate in Self::predicates(filter) {
            query = query.filter(predicate);
        }

        query
            .get_result::<i64>(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "count users"))
    }

    async fn update(&self, user_id: i32, changes: UpdateUser) -> AppResult<usize> {
        let mut conn = self.pool.get().await?;

        diesel::update(users::table.filter(users::id.eq(user_id)))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "update user"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::debug_query;

    #[test]
    fn test_contains_pattern_escapes_metacharacters() {
        assert_eq!(contains_pattern("ana"), "%ana%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
        assert_eq!(contains_pattern(""), "%%");
    }

    #[test]
    fn test_predicates_only_for_present_fields() {
        assert!(UserRepository::predicates(&UsersFilter::default()).is_empty());

        let filter = UsersFilter {
            first_name: Some("An".to_string()),
            email: Some("@example".to_string()),
            ..Default::default()
        };
        assert_eq!(UserRepository::predicates(&filter).len(), 2);
    }

    #[test]
    fn test_list_and_count_share_predicates() {
        let filter = UsersFilter {
            last_name: Some("Silva".to_string()),
            ..Default::default()
        };

        let mut list = users::table
            .select(UserSummary::as_select())
            .order(users::id.asc())
            .into_boxed();
        for predicate in UserRepository::predicates(&filter) {
            list = list.filter(predicate);
        }
        let mut count = users::table.count().into_boxed();
        for predicate in UserRepository::predicates(&filter) {
            count = count.filter(predicate);
        }

        let list_sql = debug_query::<Pg, _>(&list).to_string();
        let count_sql = debug_query::<Pg, _>(&count).to_string();
        assert!(list_sql.contains("\"users\".\"last_name\" LIKE $1"));
        assert!(count_sql.contains("\"users\".\"last_name\" LIKE $1"));
        assert!(count_sql.contains("COUNT(*)"));
    }
}
