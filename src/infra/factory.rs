use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqlitePool};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::services::booking_service::BookingService;
use crate::infra::email::http_email_service::HttpEmailService;
use crate::infra::repositories::{
    sqlite_booking_repo::SqliteBookingRepo, sqlite_property_repo::SqlitePropertyRepo,
};
use crate::state::AppState;

pub async fn bootstrap_state(config: &Config) -> AppState {
    info!("Initializing SQLite connection with WAL Mode...");

    let opts = SqliteConnectOptions::from_str(&config.database_url)
        .expect("Invalid SQLite connection string")
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await
        .expect("Failed to connect to SQLite");

    run_migrations(&pool).await;

    let booking_repo = Arc::new(SqliteBookingRepo::new(pool.clone()));
    let property_repo = Arc::new(SqlitePropertyRepo::new(pool.clone()));
    let notifier = Arc::new(HttpEmailService::new(
        config.mail_service_url.clone(),
        config.mail_service_token.clone(),
    ));

    let booking_service = Arc::new(BookingService::new(
        booking_repo.clone(),
        property_repo.clone(),
        notifier.clone(),
        config.payment_key_secret.clone(),
    ));

    AppState {
        config: config.clone(),
        booking_repo,
        property_repo,
        notifier,
        booking_service,
    }
}

async fn run_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
