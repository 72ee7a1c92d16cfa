use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub auth_issuer: String,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    /// Hotels shown on the home page.
    pub home_hotel_limit: i64,
    pub secure_cookies: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            auth_issuer: env::var("AUTH_ISSUER").unwrap_or_else(|_| "hotel-booking".to_string()),
            admin_username: env::var("ADMIN_USERNAME").ok().filter(|s| !s.is_empty()),
            admin_password: env::var("ADMIN_PASSWORD").ok().filter(|s| !s.is_empty()),
            home_hotel_limit: env::var("HOME_HOTEL_LIMIT").unwrap_or_else(|_| "6".to_string()).parse().expect("HOME_HOTEL_LIMIT must be a number"),
            secure_cookies: env::var("SECURE_COOKIES").map(|v| v != "false" && v != "0").unwrap_or(true),
        }
    }
}
