//! Process configuration: loaded once from environment variables, then passed
//! around as an immutable value. No process-wide mutable state.

use anyhow::{anyhow, Result};
use std::env;

pub struct Config {
    pub telegram_token: String,
    pub super_users: Vec<i64>,
    pub link_store_url: String,
    pub dry_mode: bool,
    pub search_url: Option<String>,
    pub search_token: Option<String>,
    pub http_port: u16,
    pub log_file: Option<String>,
}

impl Config {
    /// Loads from the environment: TELEGRAM_TOKEN and LINK_STORE_URL are required,
    /// the rest have defaults. Call `dotenvy::dotenv()` first so `.env` is seen.
    pub fn from_env() -> Result<Self> {
        let telegram_token =
            env::var("TELEGRAM_TOKEN").map_err(|_| anyhow!("TELEGRAM_TOKEN not set"))?;
        let super_users = parse_super_users(&env::var("TELEGRAM_SUPER_USERS").unwrap_or_default())?;
        let link_store_url =
            env::var("LINK_STORE_URL").map_err(|_| anyhow!("LINK_STORE_URL not set"))?;
        let dry_mode = env::var("LINK_STORE_DRY_MODE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);
        let search_url = env::var("LINK_STORE_SEARCH_URL").ok();
        let search_token = env::var("LINK_STORE_SEARCH_TOKEN").ok();
        let http_port = match env::var("HTTP_PORT") {
            Ok(v) => v.parse().map_err(|_| anyhow!("invalid HTTP_PORT: {v}"))?,
            Err(_) => 8080,
        };
        let log_file = env::var("LOG_FILE").ok();

        Ok(Self {
            telegram_token,
            super_users,
            link_store_url,
            dry_mode,
            search_url,
            search_token,
            http_port,
            log_file,
        })
    }
}

fn parse_super_users(raw: &str) -> Result<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|_| anyhow!("invalid super user id: {s}"))
        })
        .collect()
}
