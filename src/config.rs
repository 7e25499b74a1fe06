use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub generation: GenerationConfig,
    pub sending: SendingConfig,
    pub logging: LoggingConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationConfig {
    pub default_count: usize,
    pub default_seed: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SendingConfig {
    pub max_attempts: u32,
    pub retry_backoff_ms: u64,
    pub lead_delay_ms: u64,
    pub failure_rate: f64,
}

impl SendingConfig {
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    pub fn lead_delay(&self) -> Duration {
        Duration::from_millis(self.lead_delay_ms)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                path: "data/leads.db".to_string(),
            },
            generation: GenerationConfig {
                default_count: 5,
                default_seed: 42,
            },
            sending: SendingConfig {
                max_attempts: 3,
                retry_backoff_ms: 1000,
                lead_delay_ms: 500,
                failure_rate: 0.1,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            server: ServerConfig {
                address: "127.0.0.1".to_string(),
                port: 8000,
            },
        }
    }
}

pub async fn load_config(
    path: &str,
) -> std::result::Result<Config, Box<dyn std::error::Error + Send + Sync>> {
    let content = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&content)?;
    Ok(config)
}
