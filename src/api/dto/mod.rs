//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `user` - registration, login, listing and update payloads
//! - `error` - common error response body
//! - `health` - health probe responses

mod error;
mod health;
mod user;

pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use user::{
    CreateUserRequest, ListUsersQuery, LoginRequest, MessageResponse, RegisterUserRequest,
    UpdateUserRequest, UserResponse,
};
