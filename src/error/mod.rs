mod app_error;
mod database_converter;
mod user_error;

pub use app_error::{AppError, AppResult, ValidationFieldError};
pub use database_converter::DatabaseErrorConverter;
pub use user_error::{UserError, UserErrorKind};
