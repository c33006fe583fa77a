//! Configuration module
//!
//! Server identity, upload limits, media storage location and HTTP settings,
//! read from the environment (and `.env` when present).

use std::env;

use crate::models::{FileSizeBytes, ServerName};

const SERVER_PORT: u16 = 8008;
const MAX_FILE_SIZE_BYTES: i64 = 10 * 1024 * 1024;
const BASE_PATH: &str = "./media_store";

/// HTTP-level settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
}

/// Media API configuration
#[derive(Clone, Debug)]
pub struct MediaApiConfig {
    pub base: BaseConfig,
    /// Origin the uploaded media is attributed to
    pub server_name: ServerName,
    /// Upload ceiling in bytes; 0 disables the ceiling
    pub max_file_size_bytes: FileSizeBytes,
    /// Directory media files are written to
    pub base_path: String,
}

/// Application configuration, shared read-only between requests.
#[derive(Clone, Debug)]
pub struct Config(pub Box<MediaApiConfig>);

impl Config {
    fn as_media(&self) -> &MediaApiConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = MediaApiConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_media().validate()
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_env(&self.as_media().base.environment)
    }

    pub fn server_port(&self) -> u16 {
        self.as_media().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_media().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_media().base.environment
    }

    pub fn server_name(&self) -> &ServerName {
        &self.as_media().server_name
    }

    pub fn max_file_size_bytes(&self) -> FileSizeBytes {
        self.as_media().max_file_size_bytes
    }

    pub fn base_path(&self) -> &str {
        &self.as_media().base_path
    }
}

impl From<MediaApiConfig> for Config {
    fn from(config: MediaApiConfig) -> Self {
        Config(Box::new(config))
    }
}

fn is_production_env(environment: &str) -> bool {
    let environment = environment.to_lowercase();
    environment == "production" || environment == "prod"
}

/// Parse `MAX_FILE_SIZE_BYTES`. Negative values are rejected; 0 means unlimited.
pub fn parse_max_file_size(value: &str) -> Result<FileSizeBytes, anyhow::Error> {
    let bytes = value
        .trim()
        .parse::<i64>()
        .map_err(|_| anyhow::anyhow!("MAX_FILE_SIZE_BYTES must be an integer, got '{}'", value))?;
    if bytes < 0 {
        return Err(anyhow::anyhow!(
            "MAX_FILE_SIZE_BYTES cannot be negative (use 0 for unlimited)"
        ));
    }
    Ok(FileSizeBytes(bytes))
}

impl MediaApiConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        if is_production_env(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }
        let cors_origins = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
        };

        let max_file_size_bytes = match env::var("MAX_FILE_SIZE_BYTES") {
            Ok(value) => parse_max_file_size(&value)?,
            Err(_) => FileSizeBytes(MAX_FILE_SIZE_BYTES),
        };

        let config = MediaApiConfig {
            base,
            server_name: env::var("SERVER_NAME")
                .map(ServerName::from)
                .map_err(|_| anyhow::anyhow!("SERVER_NAME must be set"))?,
            max_file_size_bytes,
            base_path: env::var("BASE_PATH").unwrap_or_else(|_| BASE_PATH.to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let server_name = self.server_name.as_str();
        if server_name.trim().is_empty() {
            return Err(anyhow::anyhow!("SERVER_NAME cannot be empty"));
        }
        if server_name.contains('/') || server_name.chars().any(char::is_whitespace) {
            return Err(anyhow::anyhow!(
                "SERVER_NAME '{}' cannot contain '/' or whitespace",
                server_name
            ));
        }
        if self.max_file_size_bytes.get() < 0 {
            return Err(anyhow::anyhow!("Max file size cannot be negative"));
        }
        if self.base_path.trim().is_empty() {
            return Err(anyhow::anyhow!("BASE_PATH cannot be empty"));
        }
        Ok(())
    }
}
