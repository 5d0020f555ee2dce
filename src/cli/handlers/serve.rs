//! Serve command handler. Only the dry run lives here; `main` boots the server.

use crate::config::Settings;
use crate::error::AppResult;

pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Validate configuration and report what the server would do.
    pub fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;

        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());
        println!(
            "✓ Database pool: {}..{} connections",
            self.config.database.min_connections, self.config.database.max_connections
        );
        println!(
            "✓ Tokens expire after {} hour(s), bcrypt cost {}",
            self.config.jwt.expiration, self.config.password.cost
        );
        println!("Dry run completed successfully");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn valid_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/test".to_string();
        config.jwt.secret = "s".repeat(32);
        config
    }

    #[test]
    fn test_serve_handler_new() {
        let config = valid_config();
        let handler = ServeCommandHandler::new(config.clone());
        assert_eq!(handler.config(), &config);
    }

    #[test]
    fn test_serve_handler_dry_run() {
        assert!(ServeCommandHandler::new(valid_config()).validate_only().is_ok());
    }

    #[test]
    fn test_serve_handler_dry_run_invalid_config() {
        let mut config = valid_config();
        config.password.cost = 40;

        match ServeCommandHandler::new(config).validate_only() {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "password.cost"),
            other => panic!("Expected validation error, got {:?}", other),
        }
    }
}
