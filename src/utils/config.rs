use std::path::Path;

use anyhow::{Context, Result};

use crate::models::Settings;

const ENV_BASE_URL: &str = "PROMPTFLOW_API_BASE_URL";
const ENV_BASE_URL_LEGACY: &str = "API_BASE_URL";
const ENV_LOG_LEVEL: &str = "PROMPTFLOW_LOG";

pub const DEFAULT_SETTINGS_PATH: &str = "config/settings.json";

pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Read settings from `path`. A missing file yields the defaults; a file
/// that exists but does not parse is an error.
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file {}", path.display()))?;
    let settings = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse settings file {}", path.display()))?;
    Ok(settings)
}

pub fn apply_env_defaults(settings: &mut Settings) {
    apply_env_with(settings, |key| std::env::var(key).ok());
}

/// Environment overrides, with the variable lookup injected.
pub fn apply_env_with<F>(settings: &mut Settings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) =
        non_empty(lookup(ENV_BASE_URL)).or_else(|| non_empty(lookup(ENV_BASE_URL_LEGACY)))
    {
        settings.api.base_url = url;
    }
    if let Some(level) = non_empty(lookup(ENV_LOG_LEVEL)) {
        settings.logging.level = level;
    }
}
