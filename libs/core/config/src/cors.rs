use crate::{ConfigError, FromEnv};

/// Origins allowed when `CORS_ALLOWED_ORIGIN` is not set (the local frontend dev servers).
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "http://127.0.0.1:5173",
    "http://192.168.100.4:5173",
];

/// Cross-origin allow-list, fixed for the lifetime of the process.
///
/// Credentials are always allowed, so a wildcard origin is rejected: browsers
/// refuse `Access-Control-Allow-Origin: *` on credentialed requests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn new<I, S>(origins: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed_origins: Vec<String> = origins
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if allowed_origins.is_empty() {
            return Err(ConfigError::Invalid {
                key: "CORS_ALLOWED_ORIGIN".to_string(),
                details: "at least one origin is required".to_string(),
            });
        }

        if let Some(bad) = allowed_origins
            .iter()
            .find(|o| *o == "*" || !(o.starts_with("http://") || o.starts_with("https://")))
        {
            return Err(ConfigError::Invalid {
                key: "CORS_ALLOWED_ORIGIN".to_string(),
                details: format!("'{}' is not an explicit http(s) origin", bad),
            });
        }

        Ok(Self { allowed_origins })
    }
}

impl FromEnv for CorsConfig {
    /// Reads comma-separated origins from CORS_ALLOWED_ORIGIN
    fn from_env() -> Result<Self, ConfigError> {
        match std::env::var("CORS_ALLOWED_ORIGIN") {
            Ok(raw) => Self::new(raw.split(',')),
            Err(_) => Ok(Self::default()),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect(),
        }
    }
}
