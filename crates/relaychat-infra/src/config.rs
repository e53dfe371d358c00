//! Configuration loader for relaychat.
//!
//! Reads an optional TOML file named by `RELAYCHAT_CONFIG`, deserializes it
//! into [`RelaychatConfig`], then applies environment overrides. A missing
//! file means defaults; a file that exists but cannot be read or parsed is
//! an error, as is an override that does not parse.

use std::path::Path;
use std::str::FromStr;

use relaychat_types::config::RelaychatConfig;
use relaychat_types::error::ConfigError;

/// Env var naming the TOML config file.
pub const CONFIG_PATH_VAR: &str = "RELAYCHAT_CONFIG";

/// Load configuration from the process environment.
pub async fn load_config() -> Result<RelaychatConfig, ConfigError> {
    let config = match std::env::var(CONFIG_PATH_VAR) {
        Ok(path) => load_config_file(Path::new(&path)).await?,
        Err(_) => RelaychatConfig::default(),
    };
    apply_env(config, |var| std::env::var(var).ok())
}

/// Parse a TOML config file. A missing file yields the defaults.
pub async fn load_config_file(path: &Path) -> Result<RelaychatConfig, ConfigError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(RelaychatConfig::default());
        }
        Err(err) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                message: err.to_string(),
            });
        }
    };

    toml::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.display().to_string(),
        message: err.to_string(),
    })
}

/// Apply environment overrides on top of `config`.
///
/// `lookup` returns the value of an env var, if set. Empty values are
/// treated as unset.
pub fn apply_env(
    mut config: RelaychatConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<RelaychatConfig, ConfigError> {
    let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

    if let Some(host) = get("HOST") {
        config.server.host = host;
    }
    if let Some(port) = get("PORT") {
        config.server.port = parse_var("PORT", &port)?;
    }
    if let Some(url) = get("DATABASE_URL") {
        config.server.database_url = url;
    }

    if let Some(key) = get("GEMINI_API_KEY") {
        config.gemini.api_key = Some(key);
    }
    if let Some(model) = get("GEMINI_MODEL") {
        config.gemini.model = model;
    }
    if let Some(url) = get("GEMINI_BASE_URL") {
        config.gemini.base_url = url;
    }
    if let Some(secs) = get("UPSTREAM_TIMEOUT_SECS") {
        config.gemini.timeout_secs = Some(parse_var("UPSTREAM_TIMEOUT_SECS", &secs)?);
    }

    if let Some(url) = get("RELAY_BASE_URL") {
        config.client.relay_base_url = url;
    }
    if let Some(ms) = get("THINKING_DELAY_MS") {
        config.client.thinking_delay_ms = parse_var("THINKING_DELAY_MS", &ms)?;
    }
    if let Some(window) = get("HISTORY_WINDOW") {
        config.client.history_window = parse_var("HISTORY_WINDOW", &window)?;
    }

    Ok(config)
}

fn parse_var<T: FromStr>(var: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        var: var.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[tokio::test]
    async fn load_config_file_missing_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config_file(&tmp.path().join("relaychat.toml")).await.unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.gemini.model, "gemini-2.5-flash");
    }

    #[tokio::test]
    async fn load_config_file_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("relaychat.toml");
        tokio::fs::write(
            &path,
            r#"
[server]
port = 8080

[gemini]
model = "gemini-2.0-flash"
timeout_secs = 30

[client]
history_window = 20
"#,
        )
        .await
        .unwrap();

        let config = load_config_file(&path).await.unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.gemini.model, "gemini-2.0-flash");
        assert_eq!(config.gemini.timeout_secs, Some(30));
        assert_eq!(config.client.history_window, 20);
        assert_eq!(config.client.thinking_delay_ms, 600);
    }

    #[tokio::test]
    async fn load_config_file_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("relaychat.toml");
        tokio::fs::write(&path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let err = load_config_file(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn apply_env_without_vars_keeps_config() {
        let config = apply_env(RelaychatConfig::default(), env(&[])).unwrap();
        assert_eq!(config.server.port, 5000);
        assert!(config.gemini.api_key.is_none());
        assert_eq!(config.client.relay_base_url, "http://localhost:5000/api");
    }

    #[test]
    fn apply_env_overrides_every_section() {
        let config = apply_env(
            RelaychatConfig::default(),
            env(&[
                ("PORT", "9000"),
                ("DATABASE_URL", "sqlite://other.db?mode=rwc"),
                ("GEMINI_API_KEY", "secret"),
                ("UPSTREAM_TIMEOUT_SECS", "45"),
                ("THINKING_DELAY_MS", "0"),
                ("HISTORY_WINDOW", "0"),
            ]),
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.database_url, "sqlite://other.db?mode=rwc");
        assert_eq!(config.gemini.api_key.as_deref(), Some("secret"));
        assert_eq!(config.gemini.timeout_secs, Some(45));
        assert_eq!(config.client.thinking_delay_ms, 0);
        assert_eq!(config.client.history_window, 0);
    }

    #[test]
    fn apply_env_empty_value_is_ignored() {
        let config = apply_env(RelaychatConfig::default(), env(&[("GEMINI_API_KEY", "")])).unwrap();
        assert!(config.gemini.api_key.is_none());
    }

    #[test]
    fn apply_env_rejects_bad_port() {
        let err = apply_env(RelaychatConfig::default(), env(&[("PORT", "eighty")])).unwrap_err();
        match err {
            ConfigError::InvalidEnv { var, value } => {
                assert_eq!(var, "PORT");
                assert_eq!(value, "eighty");
            }
            other => panic!("expected InvalidEnv, got: {other}"),
        }
    }
}
