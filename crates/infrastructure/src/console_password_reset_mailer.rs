//! Console password-reset mailer for development. Logs emails to tracing output.

use async_trait::async_trait;
use freightline_application::PasswordResetMailer;
use freightline_core::AppResult;
use tracing::info;

/// Development mailer that logs reset emails to the console.
#[derive(Clone)]
pub struct ConsolePasswordResetMailer;

impl ConsolePasswordResetMailer {
    /// Creates a new console mailer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsolePasswordResetMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasswordResetMailer for ConsolePasswordResetMailer {
    async fn send_password_reset(
        &self,
        to: &str,
        reset_url: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> AppResult<bool> {
        info!(
            to = to,
            first_name = first_name.unwrap_or(""),
            last_name = last_name.unwrap_or(""),
            "--- PASSWORD RESET EMAIL (console) ---\nTo: {}\nReset link: {}\n--- END EMAIL ---",
            to,
            reset_url
        );

        Ok(true)
    }
}
