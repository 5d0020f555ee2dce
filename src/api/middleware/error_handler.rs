//! Error handler for converting AppError to HTTP responses.
//!
//! Every failure leaves the server as an [`ErrorResponse`] whose `statusCode`
//! matches the HTTP status. Infrastructure failures are logged here and
//! reported without internal detail.

use axum::{
    Json,
    extract::Request,
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

/// HTTP status for each error variant.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::User(user_error) => StatusCode::from_u16(user_error.status_code)
            .unwrap_or(StatusCode::UNPROCESSABLE_ENTITY),
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Duplicate { .. } => StatusCode::CONFLICT,
        AppError::Validation { .. }
        | AppError::ValidationErrors { .. }
        | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
        AppError::Database { .. } | AppError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Machine-readable error code for each variant.
pub fn error_to_code(error: &AppError) -> &'static str {
    match error {
        AppError::User(user_error) => user_error.code(),
        AppError::NotFound { .. } => "NOT_FOUND",
        AppError::Duplicate { .. } => "DUPLICATE",
        AppError::Validation { .. } | AppError::ValidationErrors { .. } => "VALIDATION_ERROR",
        AppError::BadRequest { .. } => "BAD_REQUEST",
        AppError::Unauthorized { .. } => "UNAUTHORIZED",
        AppError::Forbidden { .. } => "FORBIDDEN",
        AppError::Database { .. } => "DATABASE_ERROR",
        AppError::ConnectionPool { .. } => "SERVICE_UNAVAILABLE",
        AppError::Internal { .. } => "INTERNAL_ERROR",
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);
        let code = error_to_code(&self);
        let status_code = status.as_u16();

        let body = match &self {
            AppError::User(user_error) => {
                ErrorResponse::new(code, &user_error.message, status_code)
            }
            AppError::NotFound {
                entity,
                field,
                value,
            } => ErrorResponse::new(code, &self.to_string(), status_code)
                .with_details(json!({ "entity": entity, "field": field, "value": value })),
            AppError::Duplicate { entity, field, .. } => {
                ErrorResponse::new(code, &self.to_string(), status_code)
                    .with_details(json!({ "entity": entity, "field": field }))
            }
            AppError::Validation { field, reason } => {
                ErrorResponse::new(code, "Validation failed", status_code)
                    .with_details(json!([{ "field": field, "message": reason }]))
            }
            AppError::ValidationErrors { errors } => {
                ErrorResponse::new(code, "Validation failed", status_code)
                    .with_details(json!(errors))
            }
            AppError::BadRequest { message }
            | AppError::Unauthorized { message }
            | AppError::Forbidden { message } => ErrorResponse::new(code, message, status_code),
            AppError::Database { operation, source } => {
                tracing::error!(operation = %operation, error = %source, "Database error");
                ErrorResponse::new(code, "Database operation failed", status_code)
            }
            AppError::ConnectionPool { source } => {
                tracing::error!(error = %source, "Connection pool error");
                ErrorResponse::new(code, "Database connection unavailable", status_code)
            }
            AppError::Internal { source } => {
                tracing::error!(error = ?source, "Internal error");
                ErrorResponse::new(code, "An internal error occurred", status_code)
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Rewrites non-JSON error responses (extractor rejections, unmatched routes,
/// timeouts) into the standard error body.
pub async fn global_error_handler(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("application/json"));
    if is_json {
        return response;
    }

    let (parts, body) = response.into_parts();
    let original = axum::body::to_bytes(body, 64 * 1024)
        .await
        .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())
        .unwrap_or_default();

    let (code, fallback) = match status {
        StatusCode::BAD_REQUEST => ("BAD_REQUEST", "Bad request"),
        StatusCode::NOT_FOUND => ("NOT_FOUND", "The requested resource was not found"),
        StatusCode::METHOD_NOT_ALLOWED => {
            ("METHOD_NOT_ALLOWED", "HTTP method not allowed for this endpoint")
        }
        StatusCode::UNSUPPORTED_MEDIA_TYPE => ("UNSUPPORTED_MEDIA_TYPE", "Unsupported media type"),
        StatusCode::REQUEST_TIMEOUT => ("REQUEST_TIMEOUT", "Request timed out"),
        StatusCode::PAYLOAD_TOO_LARGE => ("PAYLOAD_TOO_LARGE", "Request body too large"),
        s if s.is_server_error() => ("INTERNAL_ERROR", "An internal error occurred"),
        _ => ("CLIENT_ERROR", "Request could not be processed"),
    };
    // Server-side bodies may carry internals
    let message = if original.is_empty() || status.is_server_error() {
        fallback.to_string()
    } else {
        original
    };

    let mut rewritten = (status, Json(ErrorResponse::new(code, &message, status.as_u16())))
        .into_response();
    for (name, value) in parts.headers.iter() {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            rewritten.headers_mut().insert(name.clone(), value.clone());
        }
    }
    rewritten
}
