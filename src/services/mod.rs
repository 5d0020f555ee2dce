//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and handlers.

mod user_service;

pub use user_service::{LoginResult, RegisterUser, UPDATE_SUCCESS_MESSAGE, UserService, UsersPage};

use crate::repositories::Repositories;
use crate::utils::jwt::TokenIssuer;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since underlying pools use `Arc` internally.
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    pub fn new(repos: Repositories, tokens: TokenIssuer, password_cost: u32) -> Self {
        Self {
            users: UserService::new(repos.users, tokens, password_cost),
        }
    }
}
