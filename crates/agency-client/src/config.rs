use std::time::Duration;

use agency_core::AppError;

pub const DEFAULT_BASE_URL: &str = "https://www.designrush.com";

/// Settings for the DesignRush browser scraper.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignRushConfig {
    pub base_url: String,
    pub headless: bool,
    pub navigation_timeout: Duration,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for DesignRushConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            headless: true,
            navigation_timeout: Duration::from_secs(30),
            min_delay_ms: 500,
            max_delay_ms: 1200,
        }
    }
}

impl DesignRushConfig {
    /// Read configuration from environment variables.
    ///
    /// - `AGENCY_BASE_URL` (optional, defaults to `https://www.designrush.com`)
    /// - `CHROME_HEADLESS` (optional, `True`/`true`/`1` or `False`/`false`/`0`, defaults to headless)
    /// - `AGENCY_NAV_TIMEOUT_SECS` (optional, defaults to 30)
    /// - `AGENCY_DELAY_MIN_MS` / `AGENCY_DELAY_MAX_MS` (optional, default 500 / 1200)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let base_url = lookup("AGENCY_BASE_URL").unwrap_or(defaults.base_url);
        url::Url::parse(&base_url).map_err(|e| {
            AppError::ConfigError(format!("Invalid AGENCY_BASE_URL '{base_url}': {e}"))
        })?;

        let headless = match lookup("CHROME_HEADLESS") {
            None => defaults.headless,
            Some(raw) => match raw.as_str() {
                "True" | "true" | "1" => true,
                "False" | "false" | "0" => false,
                _ => {
                    return Err(AppError::ConfigError(format!(
                        "Invalid CHROME_HEADLESS '{raw}': expected True or False"
                    )));
                }
            },
        };

        let timeout_secs = parse_u64(&lookup, "AGENCY_NAV_TIMEOUT_SECS", 30)?;
        if timeout_secs == 0 {
            return Err(AppError::ConfigError(
                "AGENCY_NAV_TIMEOUT_SECS must be at least 1".into(),
            ));
        }

        let min_delay_ms = parse_u64(&lookup, "AGENCY_DELAY_MIN_MS", defaults.min_delay_ms)?;
        let max_delay_ms = parse_u64(&lookup, "AGENCY_DELAY_MAX_MS", defaults.max_delay_ms)?;
        if min_delay_ms > max_delay_ms {
            return Err(AppError::ConfigError(format!(
                "AGENCY_DELAY_MIN_MS ({min_delay_ms}) exceeds AGENCY_DELAY_MAX_MS ({max_delay_ms})"
            )));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            headless,
            navigation_timeout: Duration::from_secs(timeout_secs),
            min_delay_ms,
            max_delay_ms,
        })
    }
}

fn parse_u64<F>(lookup: &F, key: &str, default: u64) -> Result<u64, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| {
            AppError::ConfigError(format!(
                "Invalid {key} '{raw}': must be a non-negative integer"
            ))
        }),
    }
}
