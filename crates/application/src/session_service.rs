//! Session/identity resolution.
//!
//! Resolves the current principal once per session by combining signed
//! identity-token claims with an authoritative user-directory lookup.
//! Directory values override token values per field; a failed lookup
//! degrades to token-only data instead of failing the session.

use std::sync::Arc;

use async_trait::async_trait;
use freightline_core::{AppError, AppResult, FirmId};
use freightline_domain::{Principal, Role};
use tokio::sync::RwLock;
use tracing::warn;

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// Claims extracted from the identity token. All fields are fallback
/// values; a directory record overrides each one individually when present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenClaims {
    /// Role claim, if the token carries one.
    pub role: Option<Role>,
    /// Given-name claim.
    pub given_name: Option<String>,
    /// Family-name claim.
    pub family_name: Option<String>,
    /// Firm claim.
    pub firm_id: Option<FirmId>,
}

/// A live authenticated session with its token claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    /// Claims carried by the session's identity token.
    pub claims: TokenClaims,
}

/// The authenticated identity behind the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityHandle {
    /// Stable identity-provider id (username).
    pub identity_id: String,
    /// Login email address.
    pub login_email: String,
}

/// Port over the external identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the current session, or `None` when signed out.
    async fn current_session(&self) -> AppResult<Option<AuthSession>>;

    /// Returns the current identity, or `None` when signed out.
    async fn current_identity(&self) -> AppResult<Option<IdentityHandle>>;
}

/// Authoritative user record fetched by email.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfileRecord {
    /// First name, if recorded.
    pub first_name: Option<String>,
    /// Last name, if recorded.
    pub last_name: Option<String>,
    /// Role, if recorded.
    pub role: Option<Role>,
    /// Firm, if recorded.
    pub firm_id: Option<FirmId>,
}

/// Port over the authoritative user-record store.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Finds the record for an email address; `None` means zero rows.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserProfileRecord>>;
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Resolution state of the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Resolution has not been attempted yet.
    Unresolved,
    /// A resolution is in flight.
    Loading,
    /// The principal is resolved.
    Resolved(Principal),
    /// No authenticated session exists; holds the error message.
    Failed(String),
}

/// Resolves and caches the current session's principal.
pub struct SessionService {
    identity_provider: Arc<dyn IdentityProvider>,
    user_directory: Arc<dyn UserDirectory>,
    state: RwLock<SessionState>,
}

impl SessionService {
    /// Creates a resolver over the given provider and directory.
    #[must_use]
    pub fn new(
        identity_provider: Arc<dyn IdentityProvider>,
        user_directory: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            identity_provider,
            user_directory,
            state: RwLock::new(SessionState::Unresolved),
        }
    }

    /// Returns the current resolution state.
    pub async fn state(&self) -> SessionState {
        self.state.read().await.clone()
    }

    /// Returns the resolved principal, if resolution has succeeded.
    pub async fn principal(&self) -> Option<Principal> {
        match &*self.state.read().await {
            SessionState::Resolved(principal) => Some(principal.clone()),
            _ => None,
        }
    }

    /// Resolves the principal, transitioning through `Loading`.
    ///
    /// Idempotent and safe to re-enter while a resolution is already in
    /// flight; overlapping resolutions are last-writer-wins.
    pub async fn resolve(&self) -> AppResult<Principal> {
        *self.state.write().await = SessionState::Loading;

        match self.resolve_principal().await {
            Ok(principal) => {
                *self.state.write().await = SessionState::Resolved(principal.clone());
                Ok(principal)
            }
            Err(error) => {
                *self.state.write().await = SessionState::Failed(error.to_string());
                Err(error)
            }
        }
    }

    /// Re-resolves the principal on demand.
    pub async fn refresh(&self) -> AppResult<Principal> {
        self.resolve().await
    }

    async fn resolve_principal(&self) -> AppResult<Principal> {
        let session = self
            .identity_provider
            .current_session()
            .await?
            .ok_or_else(|| AppError::Unauthorized("no valid session token".to_owned()))?;
        let identity = self
            .identity_provider
            .current_identity()
            .await?
            .ok_or_else(|| AppError::Unauthorized("no authenticated identity".to_owned()))?;

        let claims = session.claims;
        let record = match self
            .user_directory
            .find_by_email(identity.login_email.as_str())
            .await
        {
            Ok(record) => record,
            Err(error) => {
                // Zero rows is Ok(None); this is a transport or policy
                // failure, so degrade to token claims and stay resolved.
                warn!(
                    email = identity.login_email.as_str(),
                    error = %error,
                    "user directory lookup failed, falling back to token claims"
                );
                None
            }
        }
        .unwrap_or_default();

        let role = record
            .role
            .or(claims.role)
            .unwrap_or(Role::ReadOnly);

        Ok(Principal::new(
            identity.identity_id,
            identity.login_email,
            record.first_name.or(claims.given_name),
            record.last_name.or(claims.family_name),
            role,
            record.firm_id.or(claims.firm_id),
        ))
    }
}
