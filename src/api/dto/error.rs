//! Error response DTOs.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Error body shared by every failing endpoint. `statusCode` repeats the HTTP status.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "code": "USER_NOT_FOUND",
    "message": "Não foi possível encontrar esse usuário!",
    "statusCode": 422
}))]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorResponse {
    pub fn new(code: &str, message: &str, status_code: u16) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            status_code,
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_response_wire_format() {
        let body = serde_json::to_value(ErrorResponse::new("FORBIDDEN", "no", 403)).unwrap();
        assert_eq!(body, json!({"code": "FORBIDDEN", "message": "no", "statusCode": 403}));
    }

    #[test]
    fn test_error_response_details() {
        let body = ErrorResponse::new("VALIDATION_ERROR", "bad", 400)
            .with_details(json!({"field": "email"}));
        let value = serde_json::to_value(body).unwrap();
        assert_eq!(value["details"]["field"], "email");
    }
}
