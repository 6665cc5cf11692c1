//! SMTP password-reset mailer using the `lettre` crate.

use async_trait::async_trait;
use freightline_application::PasswordResetMailer;
use freightline_core::{AppError, AppResult};
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// SMTP mailer configuration.
#[derive(Clone)]
pub struct SmtpMailerConfig {
    /// SMTP server hostname.
    pub host: String,
    /// SMTP server port.
    pub port: u16,
    /// SMTP username.
    pub username: String,
    /// SMTP password.
    pub password: String,
    /// Sender email address.
    pub from_address: String,
}

/// Production password-reset mailer using SMTP.
#[derive(Clone)]
pub struct SmtpPasswordResetMailer {
    config: SmtpMailerConfig,
}

impl SmtpPasswordResetMailer {
    /// Creates a new SMTP mailer.
    #[must_use]
    pub fn new(config: SmtpMailerConfig) -> Self {
        Self { config }
    }
}

fn reset_body(reset_url: &str, first_name: Option<&str>, last_name: Option<&str>) -> String {
    let greeting = match (first_name, last_name) {
        (Some(first), Some(last)) => format!("Hi {first} {last},"),
        (Some(first), None) => format!("Hi {first},"),
        _ => "Hi,".to_owned(),
    };

    format!(
        "{greeting}\n\nA password reset was requested for your account. \
         Open the link below to choose a new password:\n\n{reset_url}\n\n\
         If you did not request this, you can ignore this email."
    )
}

#[async_trait]
impl PasswordResetMailer for SmtpPasswordResetMailer {
    async fn send_password_reset(
        &self,
        to: &str,
        reset_url: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> AppResult<bool> {
        let from = self
            .config
            .from_address
            .parse()
            .map_err(|error| AppError::Internal(format!("invalid from address: {error}")))?;

        let to_mailbox = to
            .parse()
            .map_err(|error| AppError::Internal(format!("invalid recipient address: {error}")))?;

        let message = Message::builder()
            .from(from)
            .to(to_mailbox)
            .subject("Reset your password")
            .header(ContentType::TEXT_PLAIN)
            .body(reset_body(reset_url, first_name, last_name))
            .map_err(|error| AppError::Internal(format!("failed to build email: {error}")))?;

        let credentials =
            Credentials::new(self.config.username.clone(), self.config.password.clone());

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.host)
            .map_err(|error| {
                AppError::Transport(format!("failed to create SMTP transport: {error}"))
            })?
            .port(self.config.port)
            .credentials(credentials)
            .build();

        mailer
            .send(message)
            .await
            .map_err(|error| AppError::Transport(format!("failed to send email: {error}")))?;

        Ok(true)
    }
}
