use crate::api::ListingApi;
use crate::error::{ClientError, Result};
use crate::models::{AuthResponse, LoginRequest, RegisterRequest};
use crate::session::SessionContext;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Shown when the backend gives no message of its own
pub const AUTH_FAILED: &str = "Authentication failed. Please check your details.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

#[derive(Debug, Clone)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
    pub confirm_password: String,
}

impl AuthForm {
    pub fn login(email: &str, password: &str) -> Self {
        Self {
            mode: AuthMode::Login,
            first_name: String::new(),
            last_name: String::new(),
            email: email.to_string(),
            phone_number: String::new(),
            password: password.to_string(),
            confirm_password: String::new(),
        }
    }

    /// Registration checks happen client-side; login is left to the backend
    pub fn validate(&self) -> Result<()> {
        if self.mode == AuthMode::Login {
            return Ok(());
        }
        if self.password != self.confirm_password {
            return Err(ClientError::Validation("Passwords do not match!".to_string()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ClientError::Validation(format!(
                "Password must be at least {} characters.",
                MIN_PASSWORD_LEN
            )));
        }
        Ok(())
    }

    /// Validate, authenticate and start the session
    pub async fn submit(
        &self,
        api: &dyn ListingApi,
        session: &mut SessionContext,
    ) -> Result<AuthResponse> {
        self.validate()?;

        let response = match self.mode {
            AuthMode::Login => {
                api.login(&LoginRequest {
                    email: self.email.clone(),
                    password: self.password.clone(),
                })
                .await?
            }
            AuthMode::Register => {
                api.register(&RegisterRequest {
                    first_name: self.first_name.clone(),
                    last_name: self.last_name.clone(),
                    email: self.email.clone(),
                    password: self.password.clone(),
                    phone_number: self.phone_number.clone(),
                })
                .await?
            }
        };

        session.begin(&response)?;
        Ok(response)
    }
}
