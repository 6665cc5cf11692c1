use freightline_core::FirmId;
use serde::{Deserialize, Serialize};

use crate::Role;

/// Resolved identity, role, and profile of the current session's user.
///
/// Built once per session by the session resolver from identity-token
/// claims and, when available, the authoritative user directory record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    identity_id: String,
    email: String,
    first_name: Option<String>,
    last_name: Option<String>,
    role: Role,
    firm_id: Option<FirmId>,
}

impl Principal {
    /// Creates a principal from resolved identity and profile data.
    #[must_use]
    pub fn new(
        identity_id: impl Into<String>,
        email: impl Into<String>,
        first_name: Option<String>,
        last_name: Option<String>,
        role: Role,
        firm_id: Option<FirmId>,
    ) -> Self {
        Self {
            identity_id: identity_id.into(),
            email: email.into(),
            first_name,
            last_name,
            role,
            firm_id,
        }
    }

    /// Returns the stable identity-provider id (username).
    #[must_use]
    pub fn identity_id(&self) -> &str {
        self.identity_id.as_str()
    }

    /// Returns the login email address.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Returns the first name, if known.
    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    /// Returns the last name, if known.
    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    /// Returns the resolved role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the firm the principal belongs to, if any.
    #[must_use]
    pub fn firm_id(&self) -> Option<FirmId> {
        self.firm_id
    }

    /// Returns whether `marker` identifies this principal as an owner.
    ///
    /// Board rows carry up to three owner keys for backward compatibility:
    /// the identity-provider username, the login email, or a legacy
    /// created-by value that may be either.
    #[must_use]
    pub fn matches_owner_marker(&self, marker: &str) -> bool {
        marker == self.identity_id || marker.eq_ignore_ascii_case(self.email.as_str())
    }
}
