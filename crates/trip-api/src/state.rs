//! # Application State
//!
//! Shared state for the Axum application: gateway configuration, the
//! backend client, and the payment return paths.

use serde::Deserialize;
use trip_client::{ApiConfig, RestClient};
use trip_core::ReturnPaths;

/// Optional file read before the environment
const CONFIG_PATHS: [&str; 3] = [
    "config/gateway.toml",
    "../config/gateway.toml",
    "../../config/gateway.toml",
];

/// Shape of `config/gateway.toml`; every key is optional
#[derive(Debug, Default, Deserialize)]
pub struct GatewayFile {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub public_url: Option<String>,
    pub environment: Option<String>,
    #[serde(default)]
    pub api: ApiSection,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiSection {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl GatewayFile {
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// First config file found on the search path, or an empty one
    pub fn discover() -> anyhow::Result<Self> {
        for path in CONFIG_PATHS {
            if let Ok(content) = std::fs::read_to_string(path) {
                let file = Self::from_toml(&content)
                    .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
                tracing::info!("Loaded gateway config from {}", path);
                return Ok(file);
            }
        }
        Ok(Self::default())
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Public URL the payment provider returns to
    pub public_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Layer environment variables over the config file
    pub fn load(file: &GatewayFile) -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST")
                .ok()
                .or_else(|| file.host.clone())
                .unwrap_or_else(|| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .or(file.port)
                .unwrap_or(8080),
            public_url: std::env::var("PUBLIC_URL")
                .ok()
                .or_else(|| file.public_url.clone())
                .unwrap_or_else(|| "http://localhost:8080".to_string()),
            environment: std::env::var("ENVIRONMENT")
                .ok()
                .or_else(|| file.environment.clone())
                .unwrap_or_else(|| "development".to_string()),
        }
    }

    /// Load from environment variables only
    pub fn from_env() -> Self {
        Self::load(&GatewayFile::default())
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Backend settings: env first, then the config file
fn api_config(file: &GatewayFile) -> anyhow::Result<ApiConfig> {
    match ApiConfig::from_env() {
        Ok(config) => Ok(config),
        Err(env_err) => {
            let base_url = file
                .api
                .base_url
                .clone()
                .ok_or_else(|| anyhow::anyhow!("{}", env_err))?;
            let mut config = ApiConfig::new(base_url);
            if let Some(secs) = file.api.timeout_secs {
                config = config.with_timeout_secs(secs);
            }
            config.validate().map_err(|e| anyhow::anyhow!("{}", e))?;
            Ok(config)
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Client for the booking backend
    pub backend: RestClient,
    /// Payment return paths
    pub paths: ReturnPaths,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create from the config file and environment
    pub fn new() -> anyhow::Result<Self> {
        let file = GatewayFile::discover()?;
        let config = AppConfig::load(&file);
        let api = api_config(&file)?;
        Self::from_parts(config, api)
    }

    /// Create from explicit configuration
    pub fn from_parts(config: AppConfig, api: ApiConfig) -> anyhow::Result<Self> {
        if api.bearer_token.is_some() {
            tracing::warn!(
                "TRIP_API_TOKEN is ignored by the gateway; callers supply their own token"
            );
        }
        // Forwarded calls carry only the caller's token
        let backend = RestClient::new(api)
            .map_err(|e| anyhow::anyhow!("Failed to initialize backend client: {}", e))?
            .without_bearer_token();
        let paths = ReturnPaths::new(&config.public_url);

        Ok(Self {
            backend,
            paths,
            config,
        })
    }

    /// Backend client acting for the caller; anonymous when it sent no token
    pub fn backend_for(&self, token: Option<&str>) -> RestClient {
        match token {
            Some(token) => self.backend.with_bearer_token(token),
            None => self.backend.without_bearer_token(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_file() {
        let file = GatewayFile::from_toml(
            r#"
            host = "0.0.0.0"
            port = 4000
            public_url = "https://trips.example"

            [api]
            base_url = "https://api.trips.example/api/v1"
            timeout_secs = 10
            "#,
        )
        .unwrap();

        assert_eq!(file.port, Some(4000));
        assert_eq!(file.api.timeout_secs, Some(10));
        assert_eq!(file.environment, None);
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            public_url: "http://localhost:3000".to_string(),
            environment: "test".to_string(),
        };

        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_backend_for_token() {
        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            public_url: "https://trips.example".to_string(),
            environment: "test".to_string(),
        };
        let state =
            AppState::from_parts(config, ApiConfig::new("http://localhost:5000/api/v1")).unwrap();

        assert_eq!(state.paths.success_url(), "https://trips.example/payment/success");
        let scoped = state.backend_for(Some("jwt"));
        assert_eq!(scoped.config().base_url, "http://localhost:5000/api/v1");
    }
}
