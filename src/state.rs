use crate::auth::{secret_matches, SessionKeys};
use crate::config::Config;
use crate::db::Database;
use crate::utils::error::AppError;

pub struct AppState {
    pub config: Config,
    pub keys: SessionKeys,
    pub db: Database,
}

impl AppState {
    pub fn new(config: Config, db: Database) -> Self {
        let keys = SessionKeys::new(config.jwt_secret.as_bytes());
        Self { config, keys, db }
    }

    /// Gate for the hidden admin panel, which is not token protected.
    pub fn require_admin_secret(&self, provided: Option<&str>) -> Result<(), AppError> {
        if secret_matches(&self.config.admin_secret_password, provided) {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Acesso negado - Senha secreta incorreta".to_string(),
            ))
        }
    }
}
