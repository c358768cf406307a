use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Gemini REST endpoint used when `GENAI_API_BASE` is not set.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

const DEFAULT_TEXT_MODEL: &str = "gemini-2.0-flash-lite";
const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are an expert content creator.";
const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone, Deserialize)]
pub struct TextgenConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub google: GoogleConfig,
    pub models: ModelConfig,
    pub cors: CorsConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
    pub api_key: String,
    /// Base URL of the Generative Language API, without trailing slash.
    pub api_base: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Model used for every generation request (e.g., gemini-2.0-flash-lite)
    pub text_model: String,
    /// System instruction sent alongside every prompt
    pub system_instruction: String,
    /// Sampling temperature (0.0 - 2.0)
    pub temperature: f32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins. Empty means any origin.
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObservabilityConfig {
    pub otlp_endpoint: Option<String>,
}

impl TextgenConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let temperature = get_env(
            "GENAI_TEMPERATURE",
            Some(&DEFAULT_TEMPERATURE.to_string()),
            is_prod,
        )?;
        let temperature = temperature.parse::<f32>().map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!(
                "GENAI_TEMPERATURE must be a number, got '{}': {}",
                temperature,
                e
            ))
        })?;

        Ok(TextgenConfig {
            common: common_config,
            google: GoogleConfig {
                api_key: get_env("API_KEY", None, is_prod)?,
                api_base: get_env("GENAI_API_BASE", Some(DEFAULT_API_BASE), is_prod)?
                    .trim_end_matches('/')
                    .to_string(),
            },
            models: ModelConfig {
                text_model: get_env("GENAI_TEXT_MODEL", Some(DEFAULT_TEXT_MODEL), is_prod)?,
                system_instruction: get_env(
                    "GENAI_SYSTEM_INSTRUCTION",
                    Some(DEFAULT_SYSTEM_INSTRUCTION),
                    is_prod,
                )?,
                temperature,
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .map(|v| parse_origins(&v))
                    .unwrap_or_default(),
            },
            observability: ObservabilityConfig {
                otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|v| !v.is_empty()),
            },
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
