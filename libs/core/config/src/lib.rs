pub mod cors;
pub mod server;
pub mod tracing;

use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },

    #[error("Invalid value for '{key}': {details}")]
    Invalid { key: String, details: String },
}

/// Application environment (dev = local, prod = deployed)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        if app_env.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Static identity of the running binary, captured at compile time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
}

/// Builds an [`AppInfo`] from the calling crate's Cargo metadata.
#[macro_export]
macro_rules! app_info {
    () => {
        $crate::AppInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
        }
    };
}

/// Trait for configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Helper to load environment variable with a default value
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Helper to load environment variable or return error.
///
/// Set-but-blank values count as missing.
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnvVar(key.to_string())),
    }
}

/// Like [`env_or_default`], but a set-but-blank value is rejected instead of used.
pub fn env_non_blank_or(key: &str, default: &str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) if value.trim().is_empty() => Err(ConfigError::Invalid {
            key: key.to_string(),
            details: "must not be blank".to_string(),
        }),
        Ok(value) => Ok(value.trim().to_string()),
        Err(_) => Ok(default.to_string()),
    }
}

/// Helper to parse an optional environment variable, falling back to `default` when unset.
pub fn env_parse_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_defaults_to_development() {
        temp_env::with_var_unset("APP_ENV", || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Development);
            assert!(env.is_development());
            assert!(!env.is_production());
        });
    }

    #[test]
    fn test_environment_production_case_insensitive() {
        for value in ["production", "PRODUCTION", "Production"] {
            temp_env::with_var("APP_ENV", Some(value), || {
                assert_eq!(Environment::from_env(), Environment::Production);
            });
        }
    }

    #[test]
    fn test_environment_unknown_defaults_to_development() {
        temp_env::with_var("APP_ENV", Some("staging"), || {
            assert_eq!(Environment::from_env(), Environment::Development);
        });
    }

    #[test]
    fn test_env_or_default() {
        temp_env::with_var("CFG_TEST_VAR", Some("test_value"), || {
            assert_eq!(env_or_default("CFG_TEST_VAR", "default"), "test_value");
        });
        temp_env::with_var_unset("CFG_TEST_VAR", || {
            assert_eq!(env_or_default("CFG_TEST_VAR", "default"), "default");
        });
    }

    #[test]
    fn test_env_required_missing() {
        temp_env::with_var_unset("CFG_MISSING_REQUIRED", || {
            let err = env_required("CFG_MISSING_REQUIRED").unwrap_err();
            assert!(err.to_string().contains("CFG_MISSING_REQUIRED"));
            assert!(err.to_string().contains("required"));
        });
    }

    #[test]
    fn test_env_required_rejects_blank() {
        temp_env::with_var("CFG_BLANK_REQUIRED", Some("   "), || {
            assert!(matches!(
                env_required("CFG_BLANK_REQUIRED"),
                Err(ConfigError::MissingEnvVar(_))
            ));
        });
    }

    #[test]
    fn test_env_non_blank_or() {
        temp_env::with_var_unset("TEST_NON_BLANK", || {
            assert_eq!(env_non_blank_or("TEST_NON_BLANK", "dflt").unwrap(), "dflt");
        });
        temp_env::with_var("TEST_NON_BLANK", Some(" value "), || {
            assert_eq!(env_non_blank_or("TEST_NON_BLANK", "dflt").unwrap(), "value");
        });
        temp_env::with_var("TEST_NON_BLANK", Some("   "), || {
            assert!(matches!(
                env_non_blank_or("TEST_NON_BLANK", "dflt"),
                Err(ConfigError::Invalid { ref key, .. }) if key == "TEST_NON_BLANK"
            ));
        });
    }

    #[test]
    fn test_env_parse_or() {
        temp_env::with_var_unset("CFG_PARSE", || {
            assert_eq!(env_parse_or("CFG_PARSE", 3usize).unwrap(), 3);
        });
        temp_env::with_var("CFG_PARSE", Some(" 7 "), || {
            assert_eq!(env_parse_or("CFG_PARSE", 3usize).unwrap(), 7);
        });
        temp_env::with_var("CFG_PARSE", Some("seven"), || {
            let err = env_parse_or("CFG_PARSE", 3usize).unwrap_err();
            assert!(err.to_string().contains("CFG_PARSE"));
        });
    }

    #[test]
    fn test_app_info_macro_reads_cargo_metadata() {
        let info = app_info!();
        assert_eq!(info.name, "core_config");
        assert!(!info.version.is_empty());
    }
}
