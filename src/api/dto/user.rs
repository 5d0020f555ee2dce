//! User-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::{PaginationParameters, Role, UpdateUser, User, UsersFilter};
use crate::services::RegisterUser;

const DEFAULT_PER_PAGE: i64 = 20;
const MAX_PER_PAGE: i64 = 100;

// ============================================================================
// Request DTOs
// ============================================================================

/// Public sign-up body. Any role sent by the client is ignored.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RegisterUserRequest {
    #[validate(email(message = "Email inválido"))]
    #[schema(example = "ana@example.com", format = "email")]
    pub email: String,
    #[validate(length(min = 6, max = 72, message = "A senha deve ter entre 6 e 72 caracteres"))]
    #[schema(format = "password", min_length = 6, max_length = 72)]
    pub password: String,
    #[validate(length(min = 1, max = 100, message = "Nome obrigatório"))]
    #[schema(example = "Ana")]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Sobrenome obrigatório"))]
    #[schema(example = "Souza")]
    pub last_name: String,
    #[validate(url(message = "URL do avatar inválida"))]
    pub avatar_url: Option<String>,
    #[validate(length(max = 32, message = "Telefone muito longo"))]
    pub phone: Option<String>,
    pub manager_id: Option<i32>,
}

impl From<RegisterUserRequest> for RegisterUser {
    fn from(request: RegisterUserRequest) -> Self {
        RegisterUser {
            email: request.email,
            password: request.password,
            first_name: request.first_name,
            last_name: request.last_name,
            avatar_url: request.avatar_url,
            phone: request.phone,
            role: None,
            manager_id: request.manager_id,
        }
    }
}

/// Privileged creation body. `role` is stored as sent, `User` when omitted.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "Email inválido"))]
    #[schema(example = "bruno@example.com", format = "email")]
    pub email: String,
    #[validate(length(min = 6, max = 72, message = "A senha deve ter entre 6 e 72 caracteres"))]
    #[schema(format = "password", min_length = 6, max_length = 72)]
    pub password: String,
    #[validate(length(min = 1, max = 100, message = "Nome obrigatório"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Sobrenome obrigatório"))]
    pub last_name: String,
    #[validate(url(message = "URL do avatar inválida"))]
    pub avatar_url: Option<String>,
    #[validate(length(max = 32, message = "Telefone muito longo"))]
    pub phone: Option<String>,
    #[schema(example = "Manager")]
    pub role: Option<Role>,
    pub manager_id: Option<i32>,
}

impl From<CreateUserRequest> for RegisterUser {
    fn from(request: CreateUserRequest) -> Self {
        RegisterUser {
            email: request.email,
            password: request.password,
            first_name: request.first_name,
            last_name: request.last_name,
            avatar_url: request.avatar_url,
            phone: request.phone,
            role: request.role,
            manager_id: request.manager_id,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Email inválido"))]
    #[schema(example = "ana@example.com", format = "email")]
    pub email: String,
    #[validate(length(min = 1, message = "Senha obrigatória"))]
    #[schema(format = "password")]
    pub password: String,
}

/// Only these three attributes can be changed after registration.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100, message = "Nome inválido"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Sobrenome inválido"))]
    pub last_name: Option<String>,
    #[validate(length(max = 32, message = "Telefone muito longo"))]
    pub phone: Option<String>,
}

impl From<UpdateUserRequest> for UpdateUser {
    fn from(request: UpdateUserRequest) -> Self {
        UpdateUser {
            first_name: request.first_name,
            last_name: request.last_name,
            phone: request.phone,
        }
    }
}

/// Query string of `GET /api/users`.
#[derive(Debug, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// 1-based page number
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "page deve ser maior ou igual a 1"))]
    #[param(minimum = 1, default = 1)]
    pub page: i64,
    #[serde(default = "default_per_page")]
    #[validate(range(min = 1, max = MAX_PER_PAGE, message = "per_page deve estar entre 1 e 100"))]
    #[param(minimum = 1, maximum = 100, default = 20)]
    pub per_page: i64,
    /// Substring of the first name (case-sensitive)
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

fn default_page() -> i64 {
    1
}

fn default_per_page() -> i64 {
    DEFAULT_PER_PAGE
}

impl ListUsersQuery {
    pub fn pagination(&self) -> PaginationParameters {
        PaginationParameters::new(self.page, self.per_page)
    }

    /// Empty strings impose no constraint.
    pub fn filter(&self) -> UsersFilter {
        let non_empty = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());
        UsersFilter {
            first_name: non_empty(&self.first_name),
            last_name: non_empty(&self.last_name),
            email: non_empty(&self.email),
        }
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Created user. The password hash never leaves the server.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar_url: Option<String>,
    pub phone: Option<String>,
    pub role: Role,
    pub manager_id: Option<i32>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            avatar_url: user.avatar_url,
            phone: user.phone,
            role: user.role,
            manager_id: user.manager_id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Informações atualizadas com sucesso!")]
    pub message: String,
}
