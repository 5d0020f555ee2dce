//! HTTP request handlers grouped by resource.

pub mod auth;
pub mod health;
pub mod users;
