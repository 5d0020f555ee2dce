//! User lookup, listing, update and privileged creation.
//!
//! Every route here sits behind the bearer-token middleware.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::USER_TAG;
use crate::api::dto::{
    CreateUserRequest, ErrorResponse, ListUsersQuery, MessageResponse, UpdateUserRequest,
    UserResponse,
};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::models::UserProfile;
use crate::services::UsersPage;
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery};

/// Routes: `GET|POST /`, `GET|PUT /{id}`
pub fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_users, create_user))
        .routes(routes!(get_user, update_user))
}

/// Filtered, paginated listing ordered by id.
#[utoipa::path(
    get,
    path = "/",
    tag = USER_TAG,
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Page of users", body = UsersPage),
        (status = 400, description = "Invalid pagination", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 422, description = "Page out of range", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn list_users(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListUsersQuery>,
) -> AppResult<Json<UsersPage>> {
    let page = state
        .services
        .users
        .find_all_users(query.pagination(), query.filter())
        .await?;
    Ok(Json(page))
}

/// Creates a user with any role. Administrators only.
#[utoipa::path(
    post,
    path = "/",
    tag = USER_TAG,
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 403, description = "Caller is not an administrator", body = ErrorResponse),
        (status = 422, description = "Email already in use", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn create_user(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    caller.require_admin()?;
    let user = state
        .services
        .users
        .register_one_user_auth(payload.into())
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User profile", body = UserProfile),
        (status = 422, description = "User not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<UserProfile>> {
    let profile = state.services.users.find_user_by_id(id).await?;
    Ok(Json(profile))
}

/// Changes first name, last name or phone of the caller (or any user, for administrators).
#[utoipa::path(
    put,
    path = "/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = MessageResponse),
        (status = 403, description = "Not allowed to change this user", body = ErrorResponse),
        (status = 422, description = "User not found", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn update_user(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<MessageResponse>> {
    caller.require_self_or_admin(id)?;
    let message = state
        .services
        .users
        .update_one_user(id, payload.into())
        .await?;
    Ok(Json(MessageResponse {
        message: message.to_string(),
    }))
}
