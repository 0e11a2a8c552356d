use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveTime;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqlitePool};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::services::conflicts::ConflictDetector;
use crate::domain::services::lifecycle::BookingService;
use crate::domain::services::slots::SlotGenerator;
use crate::infra::repositories::{
    sqlite_booking_repo::SqliteBookingRepo, sqlite_customer_repo::SqliteCustomerRepo,
    sqlite_service_repo::SqliteServiceRepo, sqlite_staff_repo::SqliteStaffRepo,
    sqlite_tenant_repo::SqliteTenantRepo,
};
use crate::state::AppState;

pub async fn bootstrap_state(config: &Config) -> AppState {
    info!("Initializing SQLite connection with WAL mode...");

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

    build_state(config, pool)
}

pub fn build_state(config: &Config, pool: SqlitePool) -> AppState {
    let tenant_repo = Arc::new(SqliteTenantRepo::new(pool.clone()));
    let customer_repo = Arc::new(SqliteCustomerRepo::new(pool.clone()));
    let service_repo = Arc::new(SqliteServiceRepo::new(pool.clone()));
    let staff_repo = Arc::new(SqliteStaffRepo::new(pool.clone()));
    let booking_repo = Arc::new(SqliteBookingRepo::new(pool));

    let detector = Arc::new(ConflictDetector::new(booking_repo.clone()));

    let default_window = (
        parse_wall_clock(&config.default_open_start, "DEFAULT_OPEN_START"),
        parse_wall_clock(&config.default_open_end, "DEFAULT_OPEN_END"),
    );

    let slot_generator = Arc::new(SlotGenerator::new(
        service_repo.clone(),
        staff_repo.clone(),
        detector.clone(),
        default_window,
    ));

    let booking_service = Arc::new(BookingService::new(
        booking_repo.clone(),
        service_repo.clone(),
        customer_repo.clone(),
        staff_repo.clone(),
        detector,
    ));

    AppState {
        config: config.clone(),
        tenant_repo,
        customer_repo,
        service_repo,
        staff_repo,
        booking_repo,
        booking_service,
        slot_generator,
    }
}

fn parse_wall_clock(value: &str, name: &str) -> NaiveTime {
    NaiveTime::parse_from_str(value, "%H:%M")
        .unwrap_or_else(|_| panic!("{} must be HH:MM, got '{}'", name, value))
}

async fn run_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .expect("Failed to run migrations");
}
