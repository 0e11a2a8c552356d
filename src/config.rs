use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Tenant-wide working window applied when availability is queried
    /// without a staff member (wall-clock HH:MM, UTC).
    pub default_open_start: String,
    pub default_open_end: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            default_open_start: env::var("DEFAULT_OPEN_START").unwrap_or_else(|_| "09:00".to_string()),
            default_open_end: env::var("DEFAULT_OPEN_END").unwrap_or_else(|_| "17:00".to_string()),
        }
    }
}
