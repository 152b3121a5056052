//! Panel configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::renderer::LineHeightMeasure;

/// Height of the thread header chrome added on top of the measured comments.
pub const DEFAULT_HEADER_HEIGHT: f64 = 25.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PanelConfig {
    pub header_height: f64,
    pub line_height: f64,
    pub entry_padding: f64,
    /// Id of the hosting editor, used to look up comment menus.
    pub editor_id: String,
    /// Default tracing directive for binaries embedding the panel.
    pub log_level: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            header_height: DEFAULT_HEADER_HEIGHT,
            line_height: 18.0,
            entry_padding: 8.0,
            editor_id: "notebook".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl PanelConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: PanelConfig = serde_json::from_str(json).map_err(|source| ConfigError::Parse { source })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("headerHeight", self.header_height),
            ("lineHeight", self.line_height),
            ("entryPadding", self.entry_padding),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be a finite, non-negative number")));
            }
        }
        Ok(())
    }

    pub fn line_measure(&self) -> LineHeightMeasure {
        LineHeightMeasure { line_height: self.line_height, entry_padding: self.entry_padding }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = PanelConfig::from_json(r#"{"lineHeight": 20}"#).unwrap();
        assert_eq!(config.header_height, DEFAULT_HEADER_HEIGHT);
        assert_eq!(config.line_height, 20.0);
        assert_eq!(config.editor_id, "notebook");
    }

    #[test]
    fn rejects_negative_heights() {
        assert!(matches!(PanelConfig::from_json(r#"{"headerHeight": -1}"#), Err(ConfigError::Invalid(_))));
        assert!(matches!(PanelConfig::from_json("not json"), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn json_round_trip_preserves_values() {
        let config = PanelConfig { editor_id: "nb-2".into(), ..PanelConfig::default() };
        assert_eq!(PanelConfig::from_json(&config.to_json()).unwrap(), config);
    }
}
