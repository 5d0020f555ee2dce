use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Role;

/// User model for reading from database
/// Derives Queryable for SELECT operations and Selectable for type-safe column selection
#[derive(Debug, Queryable, Selectable, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i32,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar_url: Option<String>,
    pub phone: Option<String>,
    pub role: Role,
    pub manager_id: Option<i32>,
}

impl User {
    /// Identity embedded in issued tokens.
    pub fn auth_payload(&self) -> AuthPayload {
        AuthPayload {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// NewUser model for inserting new records.
/// `password` must already hold a bcrypt hash when this reaches the store.
#[derive(Debug, Insertable, Deserialize, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar_url: Option<String>,
    pub phone: Option<String>,
    pub role: Role,
    pub manager_id: Option<i32>,
}

/// Partial update. Only the display name and phone are writable after sign-up.
#[derive(Debug, AsChangeset, Deserialize, Clone, Default, PartialEq, Eq)]
#[diesel(table_name = crate::schema::users)]
pub struct UpdateUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

impl UpdateUser {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.phone.is_none()
    }
}

/// Identity carried inside a JWT.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthPayload {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
}

/// Public view returned by the by-id lookup.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Serialize, ToSchema)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub avatar_url: Option<String>,
    pub phone: Option<String>,
    pub role: Role,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            first_name: user.first_name,
            last_name: user.last_name,
            avatar_url: user.avatar_url,
            phone: user.phone,
            role: user.role,
        }
    }
}

/// Row shape of the paginated listing.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Serialize, ToSchema)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserSummary {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub avatar_url: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    pub manager_id: Option<i32>,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            avatar_url: user.avatar_url,
            email: user.email,
            phone: user.phone,
            role: user.role,
            manager_id: user.manager_id,
        }
    }
}

/// Offset pagination window. `page_number` is 1-based; `skip` saturates at `i64::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParameters {
    pub page_number: i64,
    pub per_page_number: i64,
    pub skip: i64,
}

impl PaginationParameters {
    pub fn new(page_number: i64, per_page_number: i64) -> Self {
        Self {
            page_number,
            per_page_number,
            skip: page_number.saturating_sub(1).saturating_mul(per_page_number),
        }
    }
}

/// Substring filters for the listing. Absent fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsersFilter {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl UsersFilter {
    /// Whether `user` satisfies every present predicate.
    pub fn matches(&self, user: &User) -> bool {
        fn contains(value: &str, needle: &Option<String>) -> bool {
            needle.as_deref().is_none_or(|n| value.contains(n))
        }

        contains(&user.first_name, &self.first_name)
            && contains(&user.last_name, &self.last_name)
            && contains(&user.email, &self.email)
    }
}
