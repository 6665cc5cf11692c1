//! Privileged user-administration operations.
//!
//! Wraps the two external callable helpers (password-reset email, identity
//! deletion) behind permission checks so no caller can reach them with an
//! under-privileged role.

use std::sync::Arc;

use async_trait::async_trait;
use freightline_core::{AppError, AppResult};
use freightline_domain::{Permission, Principal, access};
use tracing::info;

/// Port over the password-reset email helper.
#[async_trait]
pub trait PasswordResetMailer: Send + Sync {
    /// Sends a reset email; returns whether delivery was accepted.
    async fn send_password_reset(
        &self,
        to: &str,
        reset_url: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> AppResult<bool>;
}

/// Port over the identity-deletion helper.
#[async_trait]
pub trait IdentityAdmin: Send + Sync {
    /// Deletes an identity from a user pool; returns whether it existed.
    async fn delete_identity(&self, username: &str, pool: &str) -> AppResult<bool>;
}

/// Permission-gated user administration.
pub struct UserAdminService {
    mailer: Arc<dyn PasswordResetMailer>,
    identity_admin: Arc<dyn IdentityAdmin>,
}

impl UserAdminService {
    /// Creates the service over the two helper ports.
    #[must_use]
    pub fn new(mailer: Arc<dyn PasswordResetMailer>, identity_admin: Arc<dyn IdentityAdmin>) -> Self {
        Self {
            mailer,
            identity_admin,
        }
    }

    /// Sends a password-reset email on behalf of a privileged actor.
    pub async fn send_password_reset(
        &self,
        actor: &Principal,
        to: &str,
        reset_url: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> AppResult<bool> {
        require_permission(actor, Permission::ResetUserPasswords)?;

        let accepted = self
            .mailer
            .send_password_reset(to, reset_url, first_name, last_name)
            .await?;
        info!(actor = actor.identity_id(), to = to, "password reset email requested");
        Ok(accepted)
    }

    /// Deletes an identity from a user pool on behalf of a privileged actor.
    pub async fn delete_identity(
        &self,
        actor: &Principal,
        username: &str,
        pool: &str,
    ) -> AppResult<bool> {
        require_permission(actor, Permission::DeleteUsers)?;

        let existed = self.identity_admin.delete_identity(username, pool).await?;
        info!(
            actor = actor.identity_id(),
            username = username,
            pool = pool,
            "identity deletion requested"
        );
        Ok(existed)
    }
}

fn require_permission(actor: &Principal, permission: Permission) -> AppResult<()> {
    if access::has_permission(Some(actor.role()), permission) {
        return Ok(());
    }

    Err(AppError::Forbidden(format!(
        "role '{}' is missing permission '{}'",
        actor.role().as_str(),
        permission.as_str()
    )))
}
