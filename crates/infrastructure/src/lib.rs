//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod console_password_reset_mailer;
mod in_memory_collection_backend;
mod in_memory_identity_pool;
mod in_memory_session_cache;
mod in_memory_user_directory;
mod smtp_password_reset_mailer;
mod static_identity_provider;
mod system_clock;

pub use console_password_reset_mailer::ConsolePasswordResetMailer;
pub use in_memory_collection_backend::InMemoryCollectionBackend;
pub use in_memory_identity_pool::InMemoryIdentityPool;
pub use in_memory_session_cache::InMemorySessionCache;
pub use in_memory_user_directory::InMemoryUserDirectory;
pub use smtp_password_reset_mailer::{SmtpMailerConfig, SmtpPasswordResetMailer};
pub use static_identity_provider::StaticIdentityProvider;
pub use system_clock::SystemClock;
