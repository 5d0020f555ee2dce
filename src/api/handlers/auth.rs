//! Public sign-up and login handlers.

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::AUTH_TAG;
use crate::api::dto::{ErrorResponse, LoginRequest, RegisterUserRequest, UserResponse};
use crate::error::AppResult;
use crate::services::LoginResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Routes: `POST /register`, `POST /login`
pub fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(register))
        .routes(routes!(login))
}

/// Creates an account with role `User`.
#[utoipa::path(
    post,
    path = "/register",
    tag = AUTH_TAG,
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 422, description = "Email already in use", body = ErrorResponse)
    )
)]
async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state
        .services
        .users
        .register_one_user(payload.into())
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Exchanges email and password for a signed token.
#[utoipa::path(
    post,
    path = "/login",
    tag = AUTH_TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResult),
        (status = 401, description = "Wrong password", body = ErrorResponse),
        (status = 422, description = "No account for this email", body = ErrorResponse)
    )
)]
async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResult>> {
    let result = state
        .services
        .users
        .login(&payload.email, &payload.password)
        .await?;
    Ok(Json(result))
}
