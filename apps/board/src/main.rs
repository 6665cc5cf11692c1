//! Freightline load-board composition root.
//!
//! Wires the in-memory adapters into the session resolver and board cache,
//! then walks one dispatcher session through the board: warm start, bulk
//! fetch, push reconciliation, optimistic create with the loads-only offline
//! fallback, filtering, and the per-user view.

#![forbid(unsafe_code)]

use std::env;
use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDate;
use freightline_application::{
    BoardCache, BoardConfig, CreateOutcome, PasswordResetMailer, SessionService, TokenClaims,
    UserAdminService, UserProfileRecord,
};
use freightline_core::AppError;
use freightline_domain::{Load, LoadDraft, Principal, Role, TrailerType, access};
use freightline_infrastructure::{
    ConsolePasswordResetMailer, InMemoryCollectionBackend, InMemoryIdentityPool,
    InMemorySessionCache, InMemoryUserDirectory, SmtpMailerConfig, SmtpPasswordResetMailer,
    StaticIdentityProvider, SystemClock,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let username = env::var("DEMO_USERNAME").unwrap_or_else(|_| "dispatcher-1".to_owned());
    let email = env::var("DEMO_EMAIL").unwrap_or_else(|_| "dispatch@firm.example.com".to_owned());
    let role = env::var("DEMO_ROLE")
        .ok()
        .map(|value| Role::from_str(&value))
        .transpose()?
        .unwrap_or(Role::Dispatcher);

    // Session resolution: token claims plus the directory record.
    let directory = Arc::new(InMemoryUserDirectory::new());
    directory
        .upsert(
            &email,
            UserProfileRecord {
                first_name: Some("Dana".to_owned()),
                last_name: Some("Ops".to_owned()),
                role: Some(role),
                firm_id: None,
            },
        )
        .await;

    let identity_provider = Arc::new(StaticIdentityProvider::signed_in(
        username.clone(),
        email.clone(),
        TokenClaims {
            role: Some(Role::ReadOnly),
            ..TokenClaims::default()
        },
    ));

    let session = SessionService::new(identity_provider, directory.clone());
    let principal = session.resolve().await?;

    info!(
        user = principal.identity_id(),
        role = principal.role().as_str(),
        permissions = access::role_permissions(principal.role()).len(),
        "session resolved"
    );

    run_loads_board(&principal).await?;
    run_user_admin(&principal).await?;

    Ok(())
}

async fn run_loads_board(principal: &Principal) -> Result<(), AppError> {
    let backend = Arc::new(InMemoryCollectionBackend::<Load>::new());
    let warm_start = Arc::new(InMemorySessionCache::new());
    let clock = Arc::new(SystemClock::new());

    let board = Arc::new(BoardCache::new(
        backend.clone(),
        warm_start,
        clock,
        BoardConfig::loads(),
        principal.clone(),
    ));

    board.warm_start().await;
    board.initialize().await?;
    let _poller = board.spawn_poller();
    let _push = board.spawn_subscription().await?;

    // Optimistic create against a healthy backend.
    let outcome = board.create(demo_draft("FL-1001", 2350.0)).await?;
    if let CreateOutcome::Persisted(load) = &outcome {
        info!(id = load.id.as_str(), "load persisted");
    }

    // The loads board keeps a local-only row when the backend is down.
    backend.set_offline(true);
    match board.create(demo_draft("FL-1002", 1800.0)).await? {
        CreateOutcome::LocalOnly { item, error } => {
            info!(id = item.id.as_str(), error = error.as_str(), "load kept locally");
        }
        CreateOutcome::Persisted(load) => {
            info!(id = load.id.as_str(), "load persisted unexpectedly");
        }
    }
    backend.set_offline(false);

    let matching = board.filter("fl-1002").await;
    let mine = board.mine().await;
    info!(
        total = board.items().await.len(),
        matching = matching.len(),
        mine = mine.len(),
        "board state after create"
    );

    Ok(())
}

async fn run_user_admin(principal: &Principal) -> Result<(), AppError> {
    let mailer: Arc<dyn PasswordResetMailer> =
        match env::var("EMAIL_PROVIDER").unwrap_or_else(|_| "console".to_owned()).as_str() {
            "smtp" => {
                let port = required_env("SMTP_PORT")?
                    .parse::<u16>()
                    .map_err(|error| AppError::Validation(format!("invalid SMTP_PORT: {error}")))?;

                Arc::new(SmtpPasswordResetMailer::new(SmtpMailerConfig {
                    host: required_env("SMTP_HOST")?,
                    port,
                    username: required_env("SMTP_USERNAME")?,
                    password: required_env("SMTP_PASSWORD")?,
                    from_address: required_env("SMTP_FROM_ADDRESS")?,
                }))
            }
            _ => Arc::new(ConsolePasswordResetMailer::new()),
        };

    let identity_pool = Arc::new(InMemoryIdentityPool::new());
    identity_pool.register("departed-user", "firm-pool").await;

    let admin = UserAdminService::new(mailer, identity_pool);

    match admin
        .send_password_reset(
            principal,
            "driver@firm.example.com",
            "https://app.example.com/reset?code=demo",
            Some("Sam"),
            None,
        )
        .await
    {
        Ok(accepted) => info!(accepted = accepted, "password reset requested"),
        Err(AppError::Forbidden(reason)) => info!(reason = reason.as_str(), "reset denied"),
        Err(error) => return Err(error),
    }

    Ok(())
}

fn demo_draft(load_number: &str, rate: f64) -> LoadDraft {
    LoadDraft {
        load_number: load_number.to_owned(),
        origin: "Memphis, TN".to_owned(),
        destination: "Dallas, TX".to_owned(),
        pickup_date: NaiveDate::from_ymd_opt(2026, 9, 2).unwrap_or_default(),
        delivery_date: NaiveDate::from_ymd_opt(2026, 9, 4).unwrap_or_default(),
        rate,
        trailer_type: TrailerType::Van,
        equipment_requirement: None,
        comment: None,
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}
