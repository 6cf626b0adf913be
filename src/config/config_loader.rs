use anyhow::{Context, Result};
use chrono::FixedOffset;

use super::{
    config_model::{Database, DotEnvyConfig, Timezone},
    stage::Stage,
};

/// Brasília time; used when `APP_TIMEZONE_OFFSET` is unset.
pub const DEFAULT_TIMEZONE_OFFSET: &str = "-03:00";

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let database = Database {
        url: std::env::var("DATABASE_URL").context("DATABASE_URL is invalid")?,
    };

    let timezone = Timezone {
        offset: parse_timezone_offset(std::env::var("APP_TIMEZONE_OFFSET").ok().as_deref())?,
    };

    Ok(DotEnvyConfig {
        database,
        timezone,
        stage: get_stage(),
    })
}

pub fn get_stage() -> Stage {
    dotenvy::dotenv().ok();

    let stage_str = std::env::var("STAGE").unwrap_or("".to_string());
    Stage::try_from(&stage_str).unwrap_or_default()
}

/// Parses `±HH:MM`; blank or missing input falls back to the default offset.
pub fn parse_timezone_offset(raw: Option<&str>) -> Result<FixedOffset> {
    let raw = match raw.map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => DEFAULT_TIMEZONE_OFFSET,
    };

    raw.parse::<FixedOffset>()
        .with_context(|| format!("APP_TIMEZONE_OFFSET is invalid: {raw}"))
}
