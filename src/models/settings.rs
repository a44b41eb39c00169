use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub version: String,
    pub api: ApiSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: "1.0.0".to_string(),
            api: ApiSettings::default(),
            ui: UiSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    pub health_check_on_start: bool,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            health_check_on_start: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub copy_feedback_ms: u64,
    pub markup: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            copy_feedback_ms: 2000,
            markup: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "api": { "base_url": "http://backend:9000" } }"#).unwrap();
        assert_eq!(settings.api.base_url, "http://backend:9000");
        assert!(settings.api.health_check_on_start);
        assert_eq!(settings.ui.copy_feedback_ms, 2000);
        assert_eq!(settings.logging.level, "warn");
    }
}
