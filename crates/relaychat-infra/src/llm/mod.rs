//! Generative model implementations.
//!
//! Contains the concrete [`GenerativeModel`] implementation for Gemini and a
//! factory ([`create_model`]) that builds it from configuration.
//!
//! [`GenerativeModel`]: relaychat_core::llm::provider::GenerativeModel

pub mod gemini;

use std::time::Duration;

use secrecy::SecretString;

use relaychat_core::llm::box_provider::BoxGenerativeModel;
use relaychat_types::config::GeminiConfig;
use relaychat_types::error::ConfigError;

use self::gemini::GeminiModel;

/// Create a [`BoxGenerativeModel`] from the Gemini section of the config.
///
/// # Errors
///
/// Returns [`ConfigError::Missing`] when no API key is configured.
pub fn create_model(config: &GeminiConfig) -> Result<BoxGenerativeModel, ConfigError> {
    let key = config
        .api_key
        .as_deref()
        .filter(|k| !k.trim().is_empty())
        .ok_or(ConfigError::Missing("GEMINI_API_KEY"))?;

    let model = GeminiModel::new(
        SecretString::from(key.to_string()),
        config.model.clone(),
        config.base_url.clone(),
        config.timeout_secs.map(Duration::from_secs),
    )
    .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

    Ok(BoxGenerativeModel::new(model))
}
