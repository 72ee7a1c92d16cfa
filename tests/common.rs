use hotel_booking::{
    api::router::create_router,
    state::{AppState, Repositories},
    config::Config,
    infra::{
        clock::FixedClock,
        factory::load_templates,
        repositories::{
            sqlite_booking_repo::SqliteBookingRepo,
            sqlite_hotel_repo::SqliteHotelRepo,
            sqlite_page_repo::SqlitePageRepo,
            sqlite_room_repo::SqliteRoomRepo,
            sqlite_user_repo::SqliteUserRepo,
        },
    },
    domain::models::{
        booking::{Booking, BookingStatus, NewBookingParams},
        hotel::Hotel,
        room::{NewRoomParams, Room},
    },
};
use sqlx::{sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::Arc;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, header, Method},
    response::Response,
    Router,
};
use chrono::{NaiveDate, Utc};
use std::str::FromStr;
use tower::ServiceExt;
use serde_json::Value;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";

pub struct AuthHeaders {
    pub access_token: String,
    pub csrf_token: String,
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[allow(dead_code)]
impl TestApp {
    /// App backed by a throwaway SQLite file, with "today" pinned to 2024-06-01.
    pub async fn new() -> Self {
        Self::with_today("2024-06-01").await
    }

    pub async fn with_today(today: &str) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            jwt_secret: "test-secret-with-enough-entropy-for-hs256".to_string(),
            auth_issuer: "test-issuer".to_string(),
            admin_username: Some(ADMIN_USERNAME.to_string()),
            admin_password: Some(ADMIN_PASSWORD.to_string()),
            home_hotel_limit: 2,
            secure_cookies: false,
        };

        let repos = Repositories {
            user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
            hotel_repo: Arc::new(SqliteHotelRepo::new(pool.clone())),
            room_repo: Arc::new(SqliteRoomRepo::new(pool.clone())),
            booking_repo: Arc::new(SqliteBookingRepo::new(pool.clone())),
            page_repo: Arc::new(SqlitePageRepo::new(pool.clone())),
        };

        let templates = Arc::new(load_templates().expect("templates must parse"));
        let state = Arc::new(AppState::new(config, repos, Arc::new(FixedClock::new(date(today))), templates));

        state.auth_service.ensure_admin(ADMIN_USERNAME, ADMIN_PASSWORD).await
            .expect("Failed to bootstrap admin");

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn login(&self) -> AuthHeaders {
        let payload = serde_json::json!({
            "username": ADMIN_USERNAME,
            "password": ADMIN_PASSWORD
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Login failed in test helper: status {}", response.status());
        }

        let access_token = cookie_value(&response, "access_token").expect("No access_token cookie returned");

        let body_json = parse_body(response).await;
        let csrf_token = body_json["csrf_token"].as_str().expect("No csrf_token in body").to_string();

        AuthHeaders {
            access_token,
            csrf_token
        }
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.router.clone().oneshot(
            Request::builder().uri(uri).body(Body::empty()).unwrap()
        ).await.unwrap()
    }

    pub async fn post_json(&self, uri: &str, payload: &Value) -> Response {
        self.router.clone().oneshot(
            Request::builder().method("POST").uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string())).unwrap()
        ).await.unwrap()
    }

    pub async fn post_form(&self, uri: &str, fields: &[(&str, &str)]) -> Response {
        let body = fields.iter()
            .map(|(k, v)| format!("{}={}", k, urlencode(v)))
            .collect::<Vec<_>>()
            .join("&");

        self.router.clone().oneshot(
            Request::builder().method("POST").uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body)).unwrap()
        ).await.unwrap()
    }

    /// Authenticated admin request; `payload` is sent as JSON when present.
    pub async fn admin(&self, auth: &AuthHeaders, method: Method, uri: &str, payload: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri)
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token);

        let request = match payload {
            Some(json) => builder.header(header::CONTENT_TYPE, "application/json").body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        };
        self.router.clone().oneshot(request.unwrap()).await.unwrap()
    }

    pub async fn seed_hotel(&self, name: &str) -> Hotel {
        let hotel = Hotel::new(name.to_string(), format!("{} description", name), format!("{} street 1", name), Utc::now());
        self.state.hotel_repo.create(&hotel).await.unwrap()
    }

    pub async fn seed_room(&self, hotel: &Hotel, name: &str) -> Room {
        let room = Room::new(NewRoomParams {
            hotel_id: hotel.id.clone(),
            name: name.to_string(),
            description: String::new(),
            area: 25.0,
            price_per_night_cents: 300000,
            photo_url: None,
        }, Utc::now());
        self.state.room_repo.create(&room).await.unwrap()
    }

    /// Inserts a booking directly, bypassing request validation.
    pub async fn seed_booking(&self, room: &Room, check_in: &str, check_out: &str, status: BookingStatus) -> Booking {
        let booking = Booking::new(NewBookingParams {
            room_id: room.id.clone(),
            guest_name: "Seeded Guest".into(),
            guest_email: "seeded@example.com".into(),
            guest_phone: "+100".into(),
            check_in: date(check_in),
            check_out: date(check_out),
        }, Utc::now());

        let created = self.state.booking_repo.create_if_available(&booking).await.unwrap()
            .expect("seeded booking overlaps an existing one");
        if status == BookingStatus::Pending {
            created
        } else {
            self.state.booking_repo.update_status(&created.id, status, Utc::now()).await.unwrap()
        }
    }

    pub async fn booking_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM bookings").fetch_one(&self.pool).await.unwrap()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}

#[allow(dead_code)]
pub async fn parse_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[allow(dead_code)]
pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[allow(dead_code)]
pub fn cookie_value(response: &Response, name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    response.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .find(|c| c.starts_with(&prefix))
        .map(|c| {
            let rest = &c[prefix.len()..];
            rest.split(';').next().unwrap_or_default().to_string()
        })
}

fn urlencode(value: &str) -> String {
    value.bytes().map(|b| match b {
        b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => (b as char).to_string(),
        b' ' => "+".to_string(),
        _ => format!("%{:02X}", b),
    }).collect()
}
