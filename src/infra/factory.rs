use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::{info, warn};
use tracing::log::LevelFilter;
use tera::Tera;

use crate::config::Config;
use crate::domain::ports::Clock;
use crate::error::AppError;
use crate::infra::clock::SystemClock;
use crate::state::{AppState, Repositories};
use crate::infra::repositories::{
    postgres_booking_repo::PostgresBookingRepo, postgres_hotel_repo::PostgresHotelRepo,
    postgres_page_repo::PostgresPageRepo, postgres_room_repo::PostgresRoomRepo,
    postgres_user_repo::PostgresUserRepo,
    sqlite_booking_repo::SqliteBookingRepo, sqlite_hotel_repo::SqliteHotelRepo,
    sqlite_page_repo::SqlitePageRepo, sqlite_room_repo::SqliteRoomRepo,
    sqlite_user_repo::SqliteUserRepo,
};

pub async fn bootstrap_state(config: &Config) -> AppState {
    bootstrap_state_with_clock(config, Arc::new(SystemClock)).await
}

pub async fn bootstrap_state_with_clock(config: &Config, clock: Arc<dyn Clock>) -> AppState {
    let database_url = &config.database_url;
    let templates = Arc::new(load_templates().expect("Failed to load site templates"));

    let repos = if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        Repositories {
            user_repo: Arc::new(PostgresUserRepo::new(pool.clone())),
            hotel_repo: Arc::new(PostgresHotelRepo::new(pool.clone())),
            room_repo: Arc::new(PostgresRoomRepo::new(pool.clone())),
            booking_repo: Arc::new(PostgresBookingRepo::new(pool.clone())),
            page_repo: Arc::new(PostgresPageRepo::new(pool)),
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        Repositories {
            user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
            hotel_repo: Arc::new(SqliteHotelRepo::new(pool.clone())),
            room_repo: Arc::new(SqliteRoomRepo::new(pool.clone())),
            booking_repo: Arc::new(SqliteBookingRepo::new(pool.clone())),
            page_repo: Arc::new(SqlitePageRepo::new(pool)),
        }
    };

    let state = AppState::new(config.clone(), repos, clock, templates);

    match (&config.admin_username, &config.admin_password) {
        (Some(username), Some(password)) => {
            state.auth_service.ensure_admin(username, password).await
                .expect("Failed to bootstrap administrator account");
        }
        _ => warn!("ADMIN_USERNAME / ADMIN_PASSWORD not set; no administrator account was bootstrapped"),
    }

    state
}

pub fn load_templates() -> Result<Tera, AppError> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("base.html", include_str!("../templates/base.html")),
        ("hotel_list.html", include_str!("../templates/hotel_list.html")),
        ("room_list.html", include_str!("../templates/room_list.html")),
        ("room_detail.html", include_str!("../templates/room_detail.html")),
        ("page.html", include_str!("../templates/page.html")),
        ("error.html", include_str!("../templates/error.html")),
    ])?;
    Ok(tera)
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
