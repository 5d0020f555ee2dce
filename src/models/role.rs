use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Access level of an account. `User` is the baseline granted on public sign-up.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, DbEnum, ToSchema,
)]
#[db_enum(existing_type_path = "crate::schema::sql_types::Role")]
pub enum Role {
    #[default]
    User,
    Manager,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "User"),
            Role::Manager => write!(f, "Manager"),
            Role::Admin => write!(f, "Admin"),
        }
    }
}
