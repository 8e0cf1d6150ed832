use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::validation::{fits_short_text, is_valid_email, non_blank};
use crate::utils::error::AppError;

/// Public view of an administrator account.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: NaiveDateTime,
}

/// Full row including the password hash. Never serialized.
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    pub id: i32,
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub id: i32,
    pub email: String,
    pub name: String,
}

impl From<UserCredentials> for SessionUser {
    fn from(user: UserCredentials) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn credentials(&self) -> Result<(&str, &str), AppError> {
        match (
            non_blank(self.email.as_deref()),
            self.password.as_deref().filter(|p| !p.is_empty()),
        ) {
            (Some(email), Some(password)) => Ok((email, password)),
            _ => Err(AppError::ValidationError(
                "Email e senha são obrigatórios".to_string(),
            )),
        }
    }
}

/// Body carrying only the shared admin secret.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretRequest {
    pub secret_password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub secret_password: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<NewUser, AppError> {
        let (Some(name), Some(email), Some(password)) = (
            non_blank(self.name.as_deref()),
            non_blank(self.email.as_deref()),
            self.password.as_deref().filter(|p| !p.is_empty()),
        ) else {
            return Err(AppError::ValidationError(
                "Nome, email e senha são obrigatórios".to_string(),
            ));
        };

        if !is_valid_email(email) {
            return Err(AppError::ValidationError(
                "Formato de email inválido".to_string(),
            ));
        }

        if !fits_short_text(name) || !fits_short_text(email) {
            return Err(AppError::ValidationError(
                "Nome e email devem ter no máximo 255 caracteres".to_string(),
            ));
        }

        Ok(NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}

/// At least one administrator must always remain.
pub fn can_remove_admin(admin_count: i64) -> bool {
    admin_count > 1
}
