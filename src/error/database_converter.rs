use crate::error::AppError;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// Utility for converting database errors to structured AppError variants.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an appropriate AppError variant.
    ///
    /// # Arguments
    /// * `error` - The Diesel error to convert
    /// * `operation` - Description of the database operation that failed
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::convert_unique_violation(info.as_ref(), operation)
            }
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                Self::convert_foreign_key_violation(info.as_ref())
            }
            DieselError::DatabaseError(_, info) => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::msg(format!("Database error: {}", info.message())),
            },
            DieselError::NotFound => AppError::NotFound {
                entity: "resource".to_string(),
                field: "id".to_string(),
                value: "unknown".to_string(),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_unique_violation(
        info: &(dyn DatabaseErrorInformation + Send + Sync),
        operation: &str,
    ) -> AppError {
        let key_value = info
            .details()
            .and_then(Self::extract_key_value)
            .or_else(|| Self::extract_key_value(info.message()));

        let Some((field, value)) = key_value else {
            return AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::msg(format!(
                    "Unique constraint violation: {}",
                    info.message()
                )),
            };
        };

        let entity = info
            .table_name()
            .map(str::to_string)
            .or_else(|| {
                info.constraint_name()
                    .and_then(|name| name.strip_suffix(&format!("_{field}_key")))
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "resource".to_string());

        AppError::Duplicate {
            entity,
            field,
            value,
        }
    }

    /// A reference to a missing row is bad client input, not a server fault.
    fn convert_foreign_key_violation(info: &(dyn DatabaseErrorInformation + Send + Sync)) -> AppError {
        match info.details().and_then(Self::extract_key_value) {
            Some((field, value)) => AppError::Validation {
                reason: format!("Nenhum registro corresponde a {field} = {value}"),
                field,
            },
            None => AppError::Validation {
                field: info.column_name().unwrap_or("reference").to_string(),
                reason: "Referência a um registro inexistente".to_string(),
            },
        }
    }

    /// Pulls `(column, value)` out of a PostgreSQL `Key (column)=(value)` detail line.
    pub fn extract_key_value(text: &str) -> Option<(String, String)> {
        let start = text.find("Key (")? + "Key (".len();
        let rest = &text[start..];
        let split = rest.find(")=(")?;
        let field = &rest[..split];
        let rest = &rest[split + ")=(".len()..];
        let end = rest.rfind(')')?;
        Some((field.to_string(), rest[..end].to_string()))
    }
}
