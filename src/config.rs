use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::path::Path;

/// Configuration keys enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    Repository,
    Labels,
    ApiBaseUrl,
}

impl ConfigKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::Repository => "repository",
            ConfigKey::Labels => "labels",
            ConfigKey::ApiBaseUrl => "api_base_url",
        }
    }

    /// Get all config keys
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::Repository,
            ConfigKey::Labels,
            ConfigKey::ApiBaseUrl,
        ]
    }
}

/// Repository moderated when nothing else is configured, fixed at build time.
pub const DEFAULT_REPOSITORY: &str = env!("STARGUARD_REPOSITORY");
/// Label attached to every closed issue, fixed at build time.
pub const DEFAULT_LABEL: &str = env!("STARGUARD_LABEL");
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
/// Environment variable holding the API token.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Filename for the project-specific configuration within the .starguard directory.
pub const PROJECT_CONFIG_FILENAME: &str = "config.json";
/// Directory name for project-specific configuration.
pub const PROJECT_CONFIG_DIR: &str = ".starguard";

/// Parses a JSON configuration file content into a map of configuration values.
///
/// Expects `content` to be a JSON object with configuration keys
/// (e.g., {"repository": "owner/name", "labels": ["spam"]}).
///
/// - Returns `Ok(HashMap<ConfigKey, Value>)` containing all recognised keys.
/// - Returns an empty HashMap if the input `content` is empty or contains only whitespace.
/// - Returns an `Err` if the JSON parsing fails or the top level is not an object.
pub fn parse_config(content: &[u8]) -> Result<HashMap<ConfigKey, Value>> {
    if content.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(HashMap::new());
    }

    let value: Value = serde_json::from_slice(content).context("Failed to parse config JSON")?;

    let mut config_map = HashMap::new();

    if let Value::Object(map) = &value {
        for key in ConfigKey::all() {
            if let Some(val) = map.get(key.as_str()) {
                config_map.insert(*key, val.clone());
            }
        }
        return Ok(config_map);
    }

    Err(anyhow::anyhow!("Config must be an object"))
}

/// Merges `updates` into `base_config` and returns a new configuration map.
///
/// If a key exists in both, the value from `updates` wins.
pub fn update_config(
    base_config: &HashMap<ConfigKey, Value>,
    updates: &HashMap<ConfigKey, Value>,
) -> HashMap<ConfigKey, Value> {
    let mut new_config = base_config.clone();
    for (key, value) in updates {
        new_config.insert(*key, value.clone());
    }
    new_config
}

/// The built-in configuration, before any project file is applied.
pub fn default_config() -> HashMap<ConfigKey, Value> {
    HashMap::from([
        (ConfigKey::Repository, json!(DEFAULT_REPOSITORY)),
        (ConfigKey::Labels, json!([DEFAULT_LABEL])),
        (ConfigKey::ApiBaseUrl, json!(DEFAULT_API_BASE_URL)),
    ])
}

/// Checks that `repo` has the `owner/name` shape.
pub fn validate_repository(repo: &str) -> Result<()> {
    let parts: Vec<&str> = repo.split('/').collect();
    if parts.len() == 2 && !parts[0].is_empty() && !parts[1].is_empty() {
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "Invalid repository format '{repo}'. Please use <owner>/<repo>."
        ))
    }
}

/// Everything a run needs, resolved once at startup.
#[derive(Clone, PartialEq)]
pub struct Settings {
    /// Target repository as `owner/name`.
    pub repository: String,
    /// Labels set on every closed issue.
    pub labels: Vec<String>,
    pub api_base_url: String,
    pub token: Option<String>,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("repository", &self.repository)
            .field("labels", &self.labels)
            .field("api_base_url", &self.api_base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Settings {
    /// Builds settings from a complete configuration map.
    pub fn from_config(config: &HashMap<ConfigKey, Value>, token: Option<String>) -> Result<Self> {
        let repository = string_value(config, ConfigKey::Repository)?;
        validate_repository(&repository)?;

        let labels = match config.get(&ConfigKey::Labels) {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_string)
                        .context("`labels` must contain only strings")
                })
                .collect::<Result<Vec<_>>>()?,
            Some(_) => return Err(anyhow::anyhow!("`labels` must be an array of strings")),
            None => return Err(anyhow::anyhow!("Missing config key `labels`")),
        };

        Ok(Settings {
            repository,
            labels,
            api_base_url: string_value(config, ConfigKey::ApiBaseUrl)?,
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    /// Loads settings from the built-in defaults, the project config file under
    /// `dir` (if any) and the token environment variable.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(PROJECT_CONFIG_DIR).join(PROJECT_CONFIG_FILENAME);
        let overrides = if config_path.exists() {
            let content = std::fs::read(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            parse_config(&content)
                .with_context(|| format!("Invalid config file {}", config_path.display()))?
        } else {
            HashMap::new()
        };

        let config = update_config(&default_config(), &overrides);
        Settings::from_config(&config, std::env::var(TOKEN_ENV_VAR).ok())
    }
}

fn string_value(config: &HashMap<ConfigKey, Value>, key: ConfigKey) -> Result<String> {
    match config.get(&key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(anyhow::anyhow!("`{}` must be a string", key.as_str())),
        None => Err(anyhow::anyhow!("Missing config key `{}`", key.as_str())),
    }
}
