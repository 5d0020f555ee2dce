//! Domain errors raised by the user service.
//!
//! Messages are user-facing and kept in Portuguese; every kind carries the
//! HTTP status it is reported with.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserErrorKind {
    DuplicateEmail,
    NoSuchAccount,
    InvalidCredentials,
    NotFound,
    PageOutOfRange,
}

impl UserErrorKind {
    /// Machine-readable code used in error bodies.
    pub fn code(self) -> &'static str {
        match self {
            UserErrorKind::DuplicateEmail => "DUPLICATE_EMAIL",
            UserErrorKind::NoSuchAccount => "NO_SUCH_ACCOUNT",
            UserErrorKind::InvalidCredentials => "INVALID_CREDENTIALS",
            UserErrorKind::NotFound => "USER_NOT_FOUND",
            UserErrorKind::PageOutOfRange => "PAGE_OUT_OF_RANGE",
        }
    }

    pub fn status_code(self) -> u16 {
        match self {
            UserErrorKind::InvalidCredentials => 401,
            _ => 422,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct UserError {
    pub kind: UserErrorKind,
    pub message: String,
    pub status_code: u16,
}

impl UserError {
    fn new(kind: UserErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status_code: kind.status_code(),
        }
    }

    pub fn duplicate_email() -> Self {
        Self::new(UserErrorKind::DuplicateEmail, "Este email já está sendo usado!")
    }

    pub fn no_such_account() -> Self {
        Self::new(UserErrorKind::NoSuchAccount, "Cadastre-se para fazer login!")
    }

    pub fn invalid_credentials() -> Self {
        Self::new(UserErrorKind::InvalidCredentials, "Senha ou email incorretos!")
    }

    pub fn not_found() -> Self {
        Self::new(
            UserErrorKind::NotFound,
            "Não foi possível encontrar esse usuário!",
        )
    }

    pub fn page_out_of_range(page: i64, pages: i64) -> Self {
        Self::new(
            UserErrorKind::PageOutOfRange,
            format!("Não existe a página {page} de um total de {pages} páginas!"),
        )
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}
