use std::str::FromStr;

use freightline_core::AppError;
use serde::{Deserialize, Serialize};

/// Job-function role assigned to exactly one principal at a time.
///
/// The set is fixed at build time; storage values match the role claim
/// vocabulary carried by identity tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Owns the firm account; holds every permission.
    OrganizationOwner,
    /// Firm-wide administrator.
    Admin,
    /// Manages day-to-day brokerage operations.
    OperationManager,
    /// Posts and books loads on behalf of customers.
    Broker,
    /// Manages trucks and driver assignments.
    Dispatcher,
    /// Operates a truck; sees assigned work only.
    Driver,
    /// Handles invoices, payments, and rates.
    Accounting,
    /// Works customer leads and quotes.
    Sales,
    /// Runs campaigns and lead generation.
    Marketing,
    /// External shipper with a portal account.
    Customer,
    /// View-only access across the boards.
    ReadOnly,
}

impl Role {
    /// Returns the stable token-claim value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OrganizationOwner => "ORGANIZATION_OWNER",
            Self::Admin => "ADMIN",
            Self::OperationManager => "OPERATION_MANAGER",
            Self::Broker => "BROKER",
            Self::Dispatcher => "DISPATCHER",
            Self::Driver => "DRIVER",
            Self::Accounting => "ACCOUNTING",
            Self::Sales => "SALES",
            Self::Marketing => "MARKETING",
            Self::Customer => "CUSTOMER",
            Self::ReadOnly => "READ_ONLY",
        }
    }

    /// Returns all known roles.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Role] = &[
            Role::OrganizationOwner,
            Role::Admin,
            Role::OperationManager,
            Role::Broker,
            Role::Dispatcher,
            Role::Driver,
            Role::Accounting,
            Role::Sales,
            Role::Marketing,
            Role::Customer,
            Role::ReadOnly,
        ];

        ALL
    }

    /// Returns the assignment rank for this role.
    ///
    /// Lower number means more privileged. The table is a strict total
    /// order: a role may assign itself or any role with an equal-or-higher
    /// number, never a lower one.
    #[must_use]
    pub fn level(&self) -> u8 {
        match self {
            Self::OrganizationOwner => 1,
            Self::Admin => 2,
            Self::OperationManager => 3,
            Self::Broker => 4,
            Self::Dispatcher => 5,
            Self::Accounting => 6,
            Self::Sales => 7,
            Self::Marketing => 8,
            Self::Driver => 9,
            Self::Customer => 10,
            Self::ReadOnly => 11,
        }
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ORGANIZATION_OWNER" => Ok(Self::OrganizationOwner),
            "ADMIN" => Ok(Self::Admin),
            "OPERATION_MANAGER" => Ok(Self::OperationManager),
            "BROKER" => Ok(Self::Broker),
            "DISPATCHER" => Ok(Self::Dispatcher),
            "DRIVER" => Ok(Self::Driver),
            "ACCOUNTING" => Ok(Self::Accounting),
            "SALES" => Ok(Self::Sales),
            "MARKETING" => Ok(Self::Marketing),
            "CUSTOMER" => Ok(Self::Customer),
            "READ_ONLY" => Ok(Self::ReadOnly),
            _ => Err(AppError::Validation(format!("unknown role value '{value}'"))),
        }
    }
}
