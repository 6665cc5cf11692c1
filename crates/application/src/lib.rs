//! Application services and ports.

#![forbid(unsafe_code)]

mod board_ports;
mod board_service;
mod session_service;
mod user_admin_service;

pub use board_ports::{Clock, CollectionBackend, PushBatch, WarmStartCache};
pub use board_service::{BoardCache, BoardConfig, BoardTask, CreateOutcome};
pub use session_service::{
    AuthSession, IdentityHandle, IdentityProvider, SessionService, SessionState, TokenClaims,
    UserDirectory, UserProfileRecord,
};
pub use user_admin_service::{IdentityAdmin, PasswordResetMailer, UserAdminService};
