use crate::types::{AppError, Result};
use serde::Deserialize;
use std::env;

/// Service configuration, loaded from the environment (with `.env` support).
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Router settings.
    pub router: RouterConfig,
    /// Encoder settings.
    pub encoder: EncoderConfig,
    /// Completion engine settings.
    pub engine: EngineConfig,
}

/// Router settings.
#[derive(Debug, Clone, Deserialize)]
pub struct RouterConfig {
    /// Minimum cosine similarity for a route to count as a match.
    pub confidence_threshold: f32,
}

/// Encoder settings.
#[derive(Debug, Clone, Deserialize)]
pub struct EncoderConfig {
    /// Embedding model name for the local encoder.
    pub model: String,
}

/// Completion engine settings.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// OpenAI-compatible endpoint base URL.
    pub api_base: String,
    /// API key for the endpoint ("test" suffices for local servers).
    pub api_key: String,
    /// Completion model name.
    pub model: String,
    /// Bound on tool-calling rounds per task.
    pub max_tool_iterations: usize,
}

impl Config {
    /// Load configuration, falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            router: RouterConfig {
                confidence_threshold: parse_var("ROUTER_CONFIDENCE_THRESHOLD", "0.72")?,
            },
            encoder: EncoderConfig {
                model: env::var("EMBEDDING_MODEL")
                    .unwrap_or_else(|_| "BAAI/bge-small-en-v1.5".to_string()),
            },
            engine: EngineConfig {
                api_base: env::var("ENGINE_API_BASE")
                    .unwrap_or_else(|_| "http://127.0.0.1:5000/v1".to_string()),
                api_key: env::var("ENGINE_API_KEY").unwrap_or_else(|_| "test".to_string()),
                model: env::var("ENGINE_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
                max_tool_iterations: parse_var("ENGINE_MAX_TOOL_ITERATIONS", "8")?,
            },
        })
    }
}

fn parse_var<T>(name: &str, default: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|e| AppError::Configuration(format!("Invalid {}: {}", name, e)))
}
