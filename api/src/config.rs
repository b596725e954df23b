use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context};
use chrono::FixedOffset;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Bearer key for admin routes; admin routes reject everything when unset
    pub admin_api_key: Option<String>,
    /// Offset of the time reference that defines Sunday 00:00
    pub epoch_utc_offset: FixedOffset,
    /// Upper bound on how long the epoch scheduler sleeps between checks
    pub scheduler_poll_interval: Duration,
    /// JSON league table overriding the built-in tiers
    pub league_config_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let epoch_utc_offset = offset_from_minutes(parse_var("EPOCH_UTC_OFFSET_MINUTES", 0)?)?;

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: parse_var("PORT", 8080)?,
            admin_api_key: env::var("ADMIN_API_KEY").ok().filter(|k| !k.is_empty()),
            epoch_utc_offset,
            scheduler_poll_interval: Duration::from_secs(parse_var("SCHEDULER_POLL_SECS", 300)?),
            league_config_path: env::var("LEAGUE_CONFIG_PATH").ok().map(PathBuf::from),
        })
    }

    /// Check if admin routes are usable
    pub fn admin_enabled(&self) -> bool {
        self.admin_api_key.is_some()
    }
}

fn offset_from_minutes(minutes: i32) -> anyhow::Result<FixedOffset> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| anyhow!("EPOCH_UTC_OFFSET_MINUTES out of range: {}", minutes))
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| anyhow!("{} is not valid ({}): {}", name, raw, e)),
        Err(_) => Ok(default),
    }
}
