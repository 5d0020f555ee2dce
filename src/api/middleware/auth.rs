//! JWT authentication middleware.
//!
//! Validates the bearer token and exposes the caller's identity to handlers
//! as an [`AuthUser`] request extension.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::error::{AppError, AppResult};
use crate::models::{AuthPayload, Role};
use crate::state::AppState;

/// Authenticated caller, extracted in handlers with `Extension<AuthUser>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser(pub AuthPayload);

impl AuthUser {
    pub fn id(&self) -> i32 {
        self.0.id
    }

    pub fn role(&self) -> Role {
        self.0.role
    }

    /// Fails with 403 unless the caller is an administrator.
    pub fn require_admin(&self) -> AppResult<()> {
        if self.role() == Role::Admin {
            Ok(())
        } else {
            Err(AppError::Forbidden {
                message: "Apenas administradores podem realizar esta ação".to_string(),
            })
        }
    }

    /// Users may change their own record; administrators may change any.
    pub fn require_self_or_admin(&self, user_id: i32) -> AppResult<()> {
        if self.id() == user_id {
            return Ok(());
        }
        self.require_admin()
    }
}

/// Requires `Authorization: Bearer <token>`; responds 401 otherwise.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized {
            message: "Missing authorization header".to_string(),
        })?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized {
            message: "Invalid authorization header format. Expected: Bearer <token>".to_string(),
        })?;

    let claims = state.tokens.verify(token)?;
    request.extensions_mut().insert(AuthUser(claims.payload));

    Ok(next.run(request).await)
}
