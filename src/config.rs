//! Widget configuration

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Error;
use crate::Result;

/// Theme hint forwarded to render surfaces that style themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Configuration consumed at widget construction.
///
/// There is no persisted state: hosts build this directly or deserialize it
/// from embedded JSON. The credential provider is passed separately as a
/// trait object, not through configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Assistant to open sessions against
    pub assistant_id: String,

    /// Service base URL; trailing slashes are stripped during validation
    pub base_url: String,

    /// Widget title shown by the render surface
    #[serde(default = "default_title")]
    pub title: String,

    /// Theme hint for the render surface
    #[serde(default)]
    pub theme: Theme,

    /// System message emitted once the session is ready
    #[serde(default = "default_welcome")]
    pub welcome_message: String,
}

fn default_title() -> String {
    "Chat Assistant".to_string()
}

fn default_welcome() -> String {
    "✅ Session started. You can now chat!".to_string()
}

impl WidgetConfig {
    /// Create a configuration with default title, theme and welcome message.
    pub fn new(assistant_id: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            assistant_id: assistant_id.into(),
            base_url: base_url.into(),
            title: default_title(),
            theme: Theme::default(),
            welcome_message: default_welcome(),
        }
    }

    /// Validate the configuration and strip trailing slashes from the base URL.
    ///
    /// The base URL must parse as an absolute URL and the assistant id must
    /// be non-empty.
    pub fn normalized(mut self) -> Result<Self> {
        if self.assistant_id.trim().is_empty() {
            return Err(Error::Config("assistant_id must not be empty".to_string()));
        }

        let trimmed = self.base_url.trim_end_matches('/');
        Url::parse(trimmed)
            .map_err(|e| Error::Config(format!("Invalid base URL {trimmed:?}: {e}")))?;
        self.base_url = trimmed.to_string();

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WidgetConfig::new("asst_1", "https://api.example.com");
        assert_eq!(config.title, "Chat Assistant");
        assert_eq!(config.theme, Theme::Light);
        assert!(config.welcome_message.contains("Session started"));
    }

    #[test]
    fn test_trailing_slashes_stripped() {
        let config = WidgetConfig::new("asst_1", "https://api.example.com///")
            .normalized()
            .unwrap();
        assert_eq!(config.base_url, "https://api.example.com");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = WidgetConfig::new("asst_1", "not a url").normalized();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_empty_assistant_id_rejected() {
        let result = WidgetConfig::new("  ", "https://api.example.com").normalized();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_deserialization_fills_defaults() {
        let config: WidgetConfig = serde_json::from_str(
            r#"{"assistant_id": "asst_1", "base_url": "https://api.example.com", "theme": "dark"}"#,
        )
        .unwrap();
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.title, "Chat Assistant");
    }

    #[test]
    fn test_config_serialization() {
        let config = WidgetConfig::new("asst_1", "https://api.example.com");
        let json = serde_json::to_string(&config).unwrap();
        let parsed: WidgetConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.assistant_id, config.assistant_id);
        assert_eq!(parsed.base_url, config.base_url);
    }
}
