use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};

use crate::api_client::DEFAULT_TIMEOUT_SECS;
use crate::contact::validation::DEFAULT_MIN_MESSAGE_LENGTH;
use crate::render::Theme;

/// Which entry-point flavour this deployment runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppVariant {
    /// Visitors can switch between the two themes; no backend probe.
    #[default]
    ThemeToggle,
    /// Probe the backend at startup and show its status; single theme.
    HealthCheck,
}

impl FromStr for AppVariant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "theme-toggle" | "theme_toggle" => Ok(AppVariant::ThemeToggle),
            "health-check" | "health_check" => Ok(AppVariant::HealthCheck),
            other => Err(anyhow!(
                "unknown variant '{other}' (expected 'theme-toggle' or 'health-check')"
            )),
        }
    }
}

impl fmt::Display for AppVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppVariant::ThemeToggle => f.write_str("theme-toggle"),
            AppVariant::HealthCheck => f.write_str("health-check"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Everything has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the contact backend. `None` makes every submission fail
    /// as a network error.
    pub backend_url: Option<String>,
    pub request_timeout_secs: u64,
    pub min_message_length: usize,
    pub port: u16,
    pub default_theme: Theme,
    pub variant: AppVariant,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            backend_url: get("BACKEND_URL"),
            request_timeout_secs: match parse_or(
                get("REQUEST_TIMEOUT_SECS"),
                DEFAULT_TIMEOUT_SECS,
                "REQUEST_TIMEOUT_SECS must be a whole number of seconds",
            )? {
                0 => bail!("REQUEST_TIMEOUT_SECS must be at least 1 second"),
                secs => secs,
            },
            min_message_length: parse_or(
                get("CONTACT_MIN_MESSAGE_LENGTH"),
                DEFAULT_MIN_MESSAGE_LENGTH,
                "CONTACT_MIN_MESSAGE_LENGTH must be a non-negative integer",
            )?,
            port: parse_or(get("PORT"), 3000, "PORT must be a valid port number")?,
            default_theme: match get("DEFAULT_THEME") {
                Some(v) => v.parse().context("DEFAULT_THEME is invalid")?,
                None => Theme::default(),
            },
            variant: match get("PORTFOLIO_VARIANT") {
                Some(v) => v.parse().context("PORTFOLIO_VARIANT is invalid")?,
                None => AppVariant::default(),
            },
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or<T>(raw: Option<String>, default: T, msg: &'static str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(v) => v.trim().parse::<T>().context(msg),
        None => Ok(default),
    }
}
