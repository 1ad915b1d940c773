use std::str::FromStr;
use std::time::Duration;

use rocket::figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use shared::{validate_items, Item};
use sqlx::postgres::PgConnectOptions;

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_FILE: &str = "Poll.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[default]
    Postgres,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub database_url: Option<String>,
    pub store: StoreKind,
    pub connect_timeout_secs: u64,
    pub max_connections: u32,
    pub session_mirror: bool,
    pub mirror_ttl_secs: u64,
    pub cors_origin_prefix: String,
    pub items: Vec<Item>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Popularity Poll".into(),
            database_url: None,
            store: StoreKind::Postgres,
            connect_timeout_secs: 5,
            max_connections: 5,
            session_mirror: true,
            mirror_ttl_secs: 3600,
            cors_origin_prefix: "http://localhost".into(),
            items: default_items(),
        }
    }
}

fn default_items() -> Vec<Item> {
    vec![
        Item::new("fig01", "Red candidate", "/fig01.svg"),
        Item::new("fig02", "Green candidate", "/fig02.svg"),
        Item::new("fig03", "Blue candidate", "/fig03.svg"),
    ]
}

/// Rocket's own sources, then `Poll.toml`, `POLL_*` and finally
/// `DATABASE_URL`, later sources winning.
pub fn figment() -> Figment {
    rocket::Config::figment()
        .merge(Toml::file(Env::var_or("POLL_CONFIG", DEFAULT_CONFIG_FILE)).nested())
        .merge(Env::prefixed("POLL_").global())
        .merge(Env::raw().only(&["DATABASE_URL"]).global())
}

impl AppConfig {
    pub fn load(figment: &Figment) -> Result<Self, ConfigError> {
        let config: AppConfig = figment
            .extract()
            .map_err(|e| ConfigError::Load(e.to_string()))?;
        validate_items(&config.items)?;
        Ok(config)
    }

    pub fn item_ids(&self) -> Vec<String> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs.max(1))
    }

    pub fn mirror_ttl(&self) -> Duration {
        Duration::from_secs(self.mirror_ttl_secs)
    }

    /// Parses `database_url`, applying the connect timeout as the server-side
    /// statement timeout as well.
    pub fn pg_connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        let url = self
            .database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)?;

        let options = PgConnectOptions::from_str(url)
            .map_err(|e| ConfigError::InvalidDatabaseUrl(e.to_string()))?;

        let timeout_ms = self.connect_timeout().as_millis().to_string();
        Ok(options.options([("statement_timeout", timeout_ms)]))
    }
}
