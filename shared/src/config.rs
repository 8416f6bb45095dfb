use anyhow::{ensure, Context, Result};
use chrono_tz::Tz;
use std::env;
use std::path::PathBuf;

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub keycloak: KeycloakConfig,
    pub booking: BookingConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            host: env::var("DB_HOST").context("DB_HOST is not set")?,
            port: env::var("DB_PORT")
                .context("DB_PORT is not set")?
                .parse()
                .context("DB_PORT must be a port number")?,
            username: env::var("DB_USER").context("DB_USER is not set")?,
            password: env::var("DB_PASSWORD").context("DB_PASSWORD is not set")?,
            database: env::var("DB_NAME").context("DB_NAME is not set")?,
            ssl: parse_flag(env::var("DB_SSL").ok().as_deref()),
        };
        let server = ServerConfig {
            host: var_or("HOST", "0.0.0.0"),
            port: var_or("PORT", "3000")
                .parse()
                .context("PORT must be a port number")?,
            static_dir: PathBuf::from(var_or("STATIC_DIR", "public")),
        };
        let keycloak = KeycloakConfig {
            url: var_or("KEYCLOAK_URL", "http://localhost:8180"),
            realm: var_or("KEYCLOAK_REALM", "ReserveringRealm"),
            client_id: var_or("KEYCLOAK_CLIENT_ID", "locatiereserveren-webapp"),
            public_key: env::var("KEYCLOAK_PUBLIC_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
        };
        let booking = BookingConfig::new(
            &var_or("BOOKING_TIMEZONE", "Europe/Amsterdam"),
            var_or("BOOKING_OPEN_HOUR", "9")
                .parse()
                .context("BOOKING_OPEN_HOUR must be an hour of the day")?,
            var_or("BOOKING_CLOSE_HOUR", "18")
                .parse()
                .context("BOOKING_CLOSE_HOUR must be an hour of the day")?,
        )?;

        Ok(Self {
            database,
            server,
            keycloak,
            booking,
        })
    }
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
    pub ssl: bool,
}

pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
}

pub struct KeycloakConfig {
    pub url: String,
    pub realm: String,
    pub client_id: String,
    /// RS256 公開鍵（PEM）。未設定の場合トークンの署名は検証しない
    pub public_key: Option<String>,
}

impl KeycloakConfig {
    pub fn issuer(&self) -> String {
        format!("{}/realms/{}", self.url.trim_end_matches('/'), self.realm)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BookingConfig {
    pub timezone: Tz,
    pub open_hour: u32,
    pub close_hour: u32,
}

impl BookingConfig {
    pub fn new(timezone: &str, open_hour: u32, close_hour: u32) -> Result<Self> {
        let timezone: Tz = timezone
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid BOOKING_TIMEZONE `{timezone}`: {e}"))?;
        ensure!(
            open_hour < close_hour && close_hour <= 23,
            "booking hours must satisfy open < close <= 23, got {open_hour}..{close_hour}"
        );
        Ok(Self {
            timezone,
            open_hour,
            close_hour,
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_flag(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("true" | "1" | "yes")
    )
}
