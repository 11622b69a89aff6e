//! Change-password form
//!
//! Validation runs locally first; only a well-formed request reaches the
//! backend. Errors stay inline in the form.

use crate::client::auth::AuthApi;
use crate::shared::error::{ApiError, FieldError, Result};

/// Shortest password the form accepts
pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Clone, Default)]
pub struct ChangePasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
    pub error: Option<String>,
    pub success: bool,
    pub loading: bool,
}

impl ChangePasswordForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Local checks: confirmation matches and the new password is long enough
    pub fn validate(&self) -> std::result::Result<(), FieldError> {
        if self.new_password != self.confirm_password {
            return Err(FieldError::new("confirm_password", "Passwords do not match"));
        }
        if self.new_password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(FieldError::new(
                "new_password",
                format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH),
            ));
        }
        Ok(())
    }

    /// Reset every field (dialog closed)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Validate and submit. On success the host should send the user to `/login`.
    pub async fn submit(&mut self, api: &AuthApi) -> Result<()> {
        self.error = None;
        if let Err(field_error) = self.validate() {
            self.error = Some(field_error.message.clone());
            return Err(ApiError::Validation(field_error));
        }

        self.loading = true;
        let result = api
            .change_password(&self.current_password, &self.new_password)
            .await;
        self.loading = false;

        match result {
            Ok(()) => {
                tracing::info!("[AUTH] Password changed");
                self.current_password.clear();
                self.new_password.clear();
                self.confirm_password.clear();
                self.success = true;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("[AUTH] Password change failed: {}", e);
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }
}
