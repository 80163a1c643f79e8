use agency_client::BackendKind;
use agency_core::AppError;

/// Server settings read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub api_key: Option<String>,
    pub backend: BackendKind,
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            api_key: None,
            backend: BackendKind::Placeholder,
            body_limit_bytes: 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Read configuration from environment variables.
    ///
    /// - `AGENCY_SERVER_HOST` (optional, defaults to `0.0.0.0`)
    /// - `AGENCY_SERVER_PORT` (optional, defaults to 3000)
    /// - `AGENCY_SERVER_API_KEY` (optional; when set, `POST /scrape` requires it)
    /// - `AGENCY_SCRAPER` (optional, `placeholder` or `browser`, defaults to `placeholder`)
    /// - `AGENCY_BODY_LIMIT_BYTES` (optional, defaults to 1 MiB)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("AGENCY_SERVER_HOST").unwrap_or(defaults.host);

        let port = match lookup("AGENCY_SERVER_PORT") {
            None => defaults.port,
            Some(raw) => raw.parse().map_err(|_| {
                AppError::ConfigError(format!(
                    "Invalid AGENCY_SERVER_PORT '{raw}': must be a port number"
                ))
            })?,
        };

        let api_key = lookup("AGENCY_SERVER_API_KEY").filter(|k| !k.trim().is_empty());

        let backend = match lookup("AGENCY_SCRAPER") {
            None => defaults.backend,
            Some(raw) => raw.parse().map_err(AppError::ConfigError)?,
        };

        let body_limit_bytes = match lookup("AGENCY_BODY_LIMIT_BYTES") {
            None => defaults.body_limit_bytes,
            Some(raw) => {
                let parsed: usize = raw.parse().map_err(|_| {
                    AppError::ConfigError(format!(
                        "Invalid AGENCY_BODY_LIMIT_BYTES '{raw}': must be a positive integer"
                    ))
                })?;
                if parsed == 0 {
                    return Err(AppError::ConfigError(
                        "AGENCY_BODY_LIMIT_BYTES must be at least 1".into(),
                    ));
                }
                parsed
            }
        };

        Ok(Self {
            host,
            port,
            api_key,
            backend,
            body_limit_bytes,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
