use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct PromptConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub google: GoogleConfig,
    pub models: ModelConfig,
    pub assets: AssetConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Baseline model used when no model key is given (e.g., gemini-2.5-flash)
    pub default_model: String,
    /// Model selected by the "pro" key (e.g., gemini-2.5-pro)
    pub pro_model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetConfig {
    /// Directory served for the bundled browser chat client.
    pub static_dir: String,
}

/// Model keys a client may request on the chat endpoint.
///
/// Unrecognized keys deliberately resolve to `Flash` rather than erroring,
/// so an outdated client still gets a working model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKey {
    Flash,
    Pro,
}

impl ModelKey {
    pub fn from_key(key: &str) -> Self {
        match key {
            "pro" => ModelKey::Pro,
            _ => ModelKey::Flash,
        }
    }
}

impl PromptConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(PromptConfig {
            common: common_config,
            google: GoogleConfig {
                api_key: get_env("GOOGLE_AI_STUDIO_API_KEY", None, is_prod)?,
            },
            models: ModelConfig {
                default_model: get_env("GENAI_DEFAULT_MODEL", Some("gemini-2.5-flash"), is_prod)?,
                pro_model: get_env("GENAI_PRO_MODEL", Some("gemini-2.5-pro"), is_prod)?,
            },
            assets: AssetConfig {
                static_dir: get_env("STATIC_DIR", Some("public"), is_prod)?,
            },
        })
    }

    /// Get the model identifier for a typed model key.
    pub fn model_for(&self, key: ModelKey) -> &str {
        match key {
            ModelKey::Flash => &self.models.default_model,
            ModelKey::Pro => &self.models.pro_model,
        }
    }

    /// Resolve an optional client-supplied model key string to a model identifier.
    pub fn resolve_model(&self, key: Option<&str>) -> &str {
        self.model_for(key.map(ModelKey::from_key).unwrap_or(ModelKey::Flash))
    }
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
