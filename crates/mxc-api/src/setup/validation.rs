//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use mxc_core::Config;

/// Validate critical configuration values
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    let is_production = config.is_production();

    if is_production && config.cors_origins().iter().any(|o| o == "*") {
        return Err(anyhow::anyhow!(
            "CORS configured to allow all origins (*) in production - this is a security risk. \
            Please set specific allowed origins via CORS_ORIGINS environment variable."
        ));
    }

    if config.max_file_size_bytes().get() == 0 {
        tracing::warn!("MAX_FILE_SIZE_BYTES is 0 - uploads of any size will be accepted");
    }

    if config.server_port() == 0 {
        return Err(anyhow::anyhow!("PORT cannot be 0"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mxc_core::{BaseConfig, FileSizeBytes, MediaApiConfig, ServerName};

    fn config(environment: &str, cors: &str) -> Config {
        Config::from(MediaApiConfig {
            base: BaseConfig {
                server_port: 8008,
                cors_origins: vec![cors.to_string()],
                environment: environment.to_string(),
            },
            server_name: ServerName::new("example.com"),
            max_file_size_bytes: FileSizeBytes(1024),
            base_path: "/tmp/media".to_string(),
        })
    }

    #[test]
    fn wildcard_cors_rejected_in_production() {
        assert!(validate_config(&config("production", "*")).is_err());
        assert!(validate_config(&config("production", "https://app.example.com")).is_ok());
        assert!(validate_config(&config("development", "*")).is_ok());
    }
}
