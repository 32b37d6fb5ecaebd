use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};

pub const DEFAULT_HISTORY_START: &str = "2025-12-29";
pub const DEFAULT_HISTORY_WEEKS: u32 = 12;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub ledger: LedgerSettings,
}

/// Settings for the fine rollups served by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerSettings {
    /// First day fines are accumulated from
    pub history_start: NaiveDate,
    /// Weeks shown by the fine history when none are requested
    pub history_weeks: u32,
}

impl LedgerSettings {
    pub fn parse(history_start: Option<&str>, history_weeks: Option<&str>) -> Result<Self> {
        let history_start = history_start.unwrap_or(DEFAULT_HISTORY_START);
        let history_start = NaiveDate::parse_from_str(history_start.trim(), "%Y-%m-%d")
            .with_context(|| format!("FINE_HISTORY_START must be YYYY-MM-DD, got '{history_start}'"))?;

        anyhow::ensure!(
            (2000..=2100).contains(&history_start.year()),
            "FINE_HISTORY_START must fall between the years 2000 and 2100"
        );

        let history_weeks = match history_weeks {
            Some(weeks) => weeks
                .trim()
                .parse()
                .with_context(|| format!("FINE_HISTORY_WEEKS must be a number, got '{weeks}'"))?,
            None => DEFAULT_HISTORY_WEEKS,
        };
        anyhow::ensure!(
            (1..=52).contains(&history_weeks),
            "FINE_HISTORY_WEEKS must be between 1 and 52"
        );

        Ok(Self {
            history_start,
            history_weeks,
        })
    }
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            history_start: NaiveDate::from_ymd_opt(2025, 12, 29).unwrap_or_default(),
            history_weeks: DEFAULT_HISTORY_WEEKS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            ledger: LedgerSettings::parse(
                std::env::var("FINE_HISTORY_START").ok().as_deref(),
                std::env::var("FINE_HISTORY_WEEKS").ok().as_deref(),
            )?,
        })
    }
}
