//! Identity provider serving one fixed session.

use async_trait::async_trait;
use freightline_application::{AuthSession, IdentityHandle, IdentityProvider, TokenClaims};
use freightline_core::AppResult;

/// Identity provider whose session is fixed at construction time.
///
/// Stands in for the hosted identity service in demos and tests; a
/// `signed_out` provider reports no session at all.
pub struct StaticIdentityProvider {
    session: Option<(AuthSession, IdentityHandle)>,
}

impl StaticIdentityProvider {
    /// Creates a provider signed in as `identity_id` / `login_email` with
    /// the given token claims.
    #[must_use]
    pub fn signed_in(
        identity_id: impl Into<String>,
        login_email: impl Into<String>,
        claims: TokenClaims,
    ) -> Self {
        Self {
            session: Some((
                AuthSession { claims },
                IdentityHandle {
                    identity_id: identity_id.into(),
                    login_email: login_email.into(),
                },
            )),
        }
    }

    /// Creates a provider with no authenticated session.
    #[must_use]
    pub fn signed_out() -> Self {
        Self { session: None }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn current_session(&self) -> AppResult<Option<AuthSession>> {
        Ok(self.session.as_ref().map(|(session, _)| session.clone()))
    }

    async fn current_identity(&self) -> AppResult<Option<IdentityHandle>> {
        Ok(self.session.as_ref().map(|(_, identity)| identity.clone()))
    }
}
