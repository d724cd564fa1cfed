use anyhow::{anyhow, Context};
use chrono_tz::Tz;
use std::str::FromStr;
use stockroom_core::utils::time_utils::DEFAULT_REPORTING_TZ;
use stockroom_storage_sqlite::DEFAULT_POOL_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Plain,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" | "text" => Ok(LogFormat::Plain),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow!("Invalid STOCKROOM_LOG_FORMAT '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub reporting_tz: Tz,
    pub log_format: LogFormat,
    pub pool_size: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let db_path = lookup("STOCKROOM_DB_PATH").unwrap_or_else(|| "./db/stockroom.db".into());
        let reporting_tz = match lookup("STOCKROOM_REPORT_TZ") {
            Some(name) => name
                .trim()
                .parse::<Tz>()
                .map_err(|e| anyhow!("Invalid STOCKROOM_REPORT_TZ '{}': {}", name, e))?,
            None => DEFAULT_REPORTING_TZ,
        };
        let log_format = match lookup("STOCKROOM_LOG_FORMAT") {
            Some(value) => value.parse()?,
            None => LogFormat::Plain,
        };
        let pool_size = match lookup("STOCKROOM_POOL_SIZE") {
            Some(value) => value
                .trim()
                .parse::<u32>()
                .with_context(|| format!("Invalid STOCKROOM_POOL_SIZE '{}'", value))?,
            None => DEFAULT_POOL_SIZE,
        };
        Ok(Self {
            db_path,
            reporting_tz,
            log_format,
            pool_size,
        })
    }
}
