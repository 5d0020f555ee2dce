//! User service for business logic operations.
//!
//! Registration, login, lookup, paginated listing and profile updates.
//! Domain failures surface as [`UserError`] wrapped in [`AppError::User`].

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult, UserError};
use crate::models::{
    AuthPayload, NewUser, PaginationParameters, Role, UpdateUser, User, UserProfile, UserSummary,
    UsersFilter,
};
use crate::repositories::UserStore;
use crate::utils::jwt::TokenIssuer;
use crate::utils::password;

/// Acknowledgement returned by [`UserService::update_one_user`].
pub const UPDATE_SUCCESS_MESSAGE: &str = "Informações atualizadas com sucesso!";

/// Registration input carrying the plaintext password.
#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar_url: Option<String>,
    pub phone: Option<String>,
    pub role: Option<Role>,
    pub manager_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResult {
    pub payload: AuthPayload,
    pub token: String,
}

/// One page of the user listing.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UsersPage {
    pub count: i64,
    pub page: i64,
    pub per_page: i64,
    pub pages: i64,
    pub users: Vec<UserSummary>,
}

/// Number of pages needed to show `count` rows, `per_page` at a time.
pub(crate) fn page_count(count: i64, per_page: i64) -> i64 {
    count / per_page + i64::from(count % per_page != 0)
}

/// User service for handling user-related business logic.
///
/// Cloning is cheap: the store is behind an `Arc` and the issuer only holds
/// the signing secret.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    tokens: TokenIssuer,
    password_cost: u32,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, tokens: TokenIssuer, password_cost: u32) -> Self {
        Self {
            store,
            tokens,
            password_cost,
        }
    }

    /// Public sign-up. The stored role is always [`Role::User`].
    pub async fn register_one_user(&self, data: RegisterUser) -> AppResult<User> {
        self.register(data, Role::User).await
    }

    /// Privileged sign-up. The caller-supplied role is stored unchanged.
    pub async fn register_one_user_auth(&self, data: RegisterUser) -> AppResult<User> {
        let role = data.role.unwrap_or_default();
        self.register(data, role).await
    }

    async fn register(&self, data: RegisterUser, role: Role) -> AppResult<User> {
        if self.store.find_by_email(&data.email).await?.is_some() {
            debug!(email = %data.email, "Registration rejected: email already in use");
            return Err(UserError::duplicate_email().into());
        }

        let hashed = password::hash_password_blocking(data.password, self.password_cost).await?;
        let new_user = NewUser {
            email: data.email,
            password: hashed,
            first_name: data.first_name,
            last_name: data.last_name,
            avatar_url: data.avatar_url,
            phone: data.phone,
            role,
            manager_id: data.manager_id,
        };

        let user = self.store.create(new_user).await.map_err(|e| match e {
            // Lost a race against a concurrent sign-up with the same email
            AppError::Duplicate { field, .. } if field == "email" => {
                UserError::duplicate_email().into()
            }
            other => other,
        })?;

        info!(user_id = user.id, role = %user.role, "User registered");
        Ok(user)
    }

    /// Checks credentials and issues a signed token.
    pub async fn login(&self, email: &str, plain_password: &str) -> AppResult<LoginResult> {
        let Some(user) = self.find_one_user(email).await? else {
            debug!(email, "Login rejected: no account");
            return Err(UserError::no_such_account().into());
        };

        let matches = password::verify_password_blocking(
            plain_password.to_string(),
            user.password.clone(),
        )
        .await?;
        if !matches {
            warn!(user_id = user.id, "Login rejected: wrong password");
            return Err(UserError::invalid_credentials().into());
        }

        let payload = user.auth_payload();
        let token = self.tokens.issue(payload.clone())?;
        info!(user_id = user.id, "User logged in");
        Ok(LoginResult { payload, token })
    }

    /// Looks up a user by email. Absence is not an error.
    pub async fn find_one_user(&self, email: &str) -> AppResult<Option<User>> {
        self.store.find_by_email(email).await
    }

    pub async fn find_user_by_id(&self, id: i32) -> AppResult<UserProfile> {
        self.store
            .find_profile_by_id(id)
            .await?
            .ok_or_else(|| UserError::not_found().into())
    }

    /// Filtered page of users plus the totals needed to navigate.
    ///
    /// The page and the count are fetched concurrently with the same filter.
    /// Requesting a page past the last one fails, including any page when
    /// nothing matches.
    pub async fn find_all_users(
        &self,
        pagination: PaginationParameters,
        filter: UsersFilter,
    ) -> AppResult<UsersPage> {
        if pagination.page_number < 1 || pagination.per_page_number < 1 {
            return Err(AppError::Validation {
                field: "page".to_string(),
                reason: "page and per_page must be positive".to_string(),
            });
        }

        let (users, count) = tokio::try_join!(
            self.store.list(&filter, pagination),
            self.store.count(&filter)
        )?;

        let pages = page_count(count, pagination.per_page_number);
        if pagination.page_number > pages {
            debug!(page = pagination.page_number, pages, "Page out of range");
            return Err(UserError::page_out_of_range(pagination.page_number, pages).into());
        }

        Ok(UsersPage {
            count,
            page: pagination.page_number,
            per_page: pagination.per_page_number,
            pages,
            users,
        })
    }

    /// Updates first name, last name and phone. Other attributes are not writable.
    pub async fn update_one_user(&self, id: i32, changes: UpdateUser) -> AppResult<&'static str> {
        if changes.is_empty() {
            self.find_user_by_id(id).await?;
            return Ok(UPDATE_SUCCESS_MESSAGE);
        }

        let affected = self.store.update(id, changes).await?;
        if affected == 0 {
            return Err(UserError::not_found().into());
        }

        info!(user_id = id, "User updated");
        Ok(UPDATE_SUCCESS_MESSAGE)
    }
}
