//! # Pure Data Module - Data Transfer Objects Only
//!
//! ## Responsibilities
//!
//! - Define configuration data structures
//! - Provide TOML → DTO mapping
//!
//! ## Iron Rule
//!
//! > **This module contains data only, no policy, no validation.**
//! > Missing keys become empty values; they are facts, not errors.

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Label of the window the titlebar controls (may be empty)
    pub window_label: String,

    /// Skip global shortcut registration entirely
    pub shortcuts_disabled: bool,

    /// Updater request timeout in seconds (0 means the host default)
    pub update_timeout_secs: u64,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    ///
    /// **Prohibited**: This method must NOT contain any validation
    /// or default value logic.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        Ok(Self {
            window_label: toml_value
                .get("window")
                .and_then(|w| w.get("label"))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            shortcuts_disabled: toml_value
                .get("shortcuts")
                .and_then(|s| s.get("disabled"))
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
            update_timeout_secs: toml_value
                .get("update")
                .and_then(|u| u.get("timeout_secs"))
                .and_then(|v| v.as_integer())
                .unwrap_or(0)
                .max(0) as u64,
        })
    }

    /// Create empty AppConfig (all empty/default values)
    pub fn empty() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::AppConfig;

    #[test]
    fn maps_all_sections() {
        let value: toml::Value = toml::from_str(
            r#"
            [window]
            label = "launcher"

            [shortcuts]
            disabled = true

            [update]
            timeout_secs = 30
            "#,
        )
        .unwrap();

        let config = AppConfig::from_toml(&value).unwrap();
        assert_eq!(config.window_label, "launcher");
        assert!(config.shortcuts_disabled);
        assert_eq!(config.update_timeout_secs, 30);
    }

    #[test]
    fn missing_sections_are_empty_facts() {
        let value: toml::Value = toml::from_str("").unwrap();
        assert_eq!(AppConfig::from_toml(&value).unwrap(), AppConfig::empty());
    }
}
