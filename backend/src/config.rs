use anyhow::Context;
use time::{macros::format_description, Date, UtcOffset};

use crate::schedule::{ScheduleSettings, DEFAULT_ANCHOR};

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: Option<String>,
    pub submission_url: Option<String>,
    pub listen_addr: String,
    pub cors_origins: Vec<String>,
    pub utc_offset: UtcOffset,
    pub rotation_anchor: Date,
    pub seed_default_holidays: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let utc_offset = match std::env::var("SCHEDULE_UTC_OFFSET") {
            Ok(raw) => parse_utc_offset(&raw).with_context(|| {
                format!("SCHEDULE_UTC_OFFSET must look like +05:00, got {raw:?}")
            })?,
            Err(_) => UtcOffset::UTC,
        };

        let rotation_anchor = match std::env::var("ROTATION_ANCHOR") {
            Ok(raw) => Date::parse(&raw, format_description!("[year]-[month]-[day]"))
                .with_context(|| format!("ROTATION_ANCHOR must be YYYY-MM-DD, got {raw:?}"))?,
            Err(_) => DEFAULT_ANCHOR,
        };

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()),
            submission_url: std::env::var("SUBMISSION_URL").ok().filter(|s| !s.is_empty()),
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:5173".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            utc_offset,
            rotation_anchor,
            seed_default_holidays: std::env::var("SEED_DEFAULT_HOLIDAYS")
                .unwrap_or_else(|_| "true".into())
                .parse()
                .context("SEED_DEFAULT_HOLIDAYS must be true or false")?,
        })
    }

    pub fn schedule_settings(&self) -> ScheduleSettings {
        ScheduleSettings {
            utc_offset: self.utc_offset,
            default_anchor: self.rotation_anchor,
        }
    }
}

fn parse_utc_offset(raw: &str) -> anyhow::Result<UtcOffset> {
    let offset = UtcOffset::parse(
        raw.trim(),
        format_description!("[offset_hour sign:mandatory]:[offset_minute]"),
    )?;
    Ok(offset)
}
