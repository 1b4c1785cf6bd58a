use core_config::{AppInfo, FromEnv, app_info, cors::CorsConfig, server::ServerConfig};
use domain_rag::RagConfig;

pub use core_config::Environment;

/// Application configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub cors: CorsConfig,
    pub rag: RagConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let cors = CorsConfig::from_env()?;
        let rag = RagConfig::from_env()?; // Requires PINECONE_API_KEY and GOOGLE_AI_KEY

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            cors,
            rag,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_info_comes_from_package() {
        temp_env::with_vars(
            [
                ("PINECONE_API_KEY", Some("pc-key")),
                ("GOOGLE_AI_KEY", Some("g-key")),
                ("CORS_ALLOWED_ORIGIN", None),
                ("EMBEDDING_PROVIDER", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app.name, "chatbot_api");
                assert_eq!(config.app.description, "Grocery chatbot API");
                assert_eq!(config.cors, CorsConfig::default());
            },
        );
    }

    #[test]
    fn test_wildcard_cors_is_fatal() {
        temp_env::with_vars(
            [
                ("PINECONE_API_KEY", Some("pc-key")),
                ("GOOGLE_AI_KEY", Some("g-key")),
                ("CORS_ALLOWED_ORIGIN", Some("*")),
            ],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("CORS_ALLOWED_ORIGIN"));
            },
        );
    }

    #[test]
    fn test_missing_credentials_are_fatal() {
        temp_env::with_vars(
            [("PINECONE_API_KEY", None::<&str>), ("GOOGLE_AI_KEY", None)],
            || {
                assert!(Config::from_env().is_err());
            },
        );
    }
}
