//! User settings for the synchronization engine
//!
//! This module defines the two user-facing knobs: the master switch and
//! the mapping mode. Settings carry serde support so they can be
//! persisted as JSON in the user's config directory.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Sync Mode
// ─────────────────────────────────────────────────────────────────────────────

/// How a driving panel's visible range is mapped onto its peers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SyncMode {
    /// Peers follow the driver's line numbers directly. The natural
    /// choice when every panel shows the same document.
    #[default]
    Proportional,
    /// Peers keep the scroll distance they had from the driver when the
    /// gesture started. The natural choice for related documents that
    /// drift apart in length.
    Offset,
}

impl SyncMode {
    /// Switch to the other mode.
    pub fn toggle(&self) -> Self {
        match self {
            SyncMode::Proportional => SyncMode::Offset,
            SyncMode::Offset => SyncMode::Proportional,
        }
    }

    /// Get a display label for the mode.
    pub fn label(&self) -> &'static str {
        match self {
            SyncMode::Proportional => "Proportional",
            SyncMode::Offset => "Offset",
        }
    }

    pub fn is_offset(&self) -> bool {
        matches!(self, SyncMode::Offset)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sync Settings
// ─────────────────────────────────────────────────────────────────────────────

/// User preferences for the engine.
///
/// This struct is serialized to JSON and persisted to the user's config
/// directory. Missing fields fall back to their defaults via
/// `#[serde(default)]`, so configs written by older builds keep loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    /// Master switch for scroll and selection synchronization
    pub enabled: bool,

    /// Active mapping mode
    pub mode: SyncMode,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            enabled: true, // Synchronization is on out of the box
            mode: SyncMode::default(),
        }
    }
}

impl SyncSettings {
    /// Flip the master switch and return the new state.
    pub fn toggle_enabled(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    /// Switch to the other mapping mode and return it.
    pub fn toggle_mode(&mut self) -> SyncMode {
        self.mode = self.mode.toggle();
        self.mode
    }

    /// Short status line for status bars and toasts.
    ///
    /// Shows the active mode while enabled, e.g. `Sync: on (Offset)`,
    /// and just `Sync: off` otherwise.
    pub fn status_label(&self) -> String {
        if self.enabled {
            format!("Sync: on ({})", self.mode.label())
        } else {
            String::from("Sync: off")
        }
    }

    /// Parse settings from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigParse` when the document is not valid JSON
    /// or the fields have the wrong types.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = SyncSettings::default();
        assert!(settings.enabled);
        assert_eq!(settings.mode, SyncMode::Proportional);
    }

    #[test]
    fn test_toggle_enabled() {
        let mut settings = SyncSettings::default();
        assert!(!settings.toggle_enabled());
        assert!(!settings.enabled);
        assert!(settings.toggle_enabled());
    }

    #[test]
    fn test_toggle_mode() {
        let mut settings = SyncSettings::default();
        assert_eq!(settings.toggle_mode(), SyncMode::Offset);
        assert_eq!(settings.toggle_mode(), SyncMode::Proportional);
    }

    #[test]
    fn test_mode_toggle() {
        assert_eq!(SyncMode::Proportional.toggle(), SyncMode::Offset);
        assert_eq!(SyncMode::Offset.toggle(), SyncMode::Proportional);
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(SyncMode::Proportional.label(), "Proportional");
        assert_eq!(SyncMode::Offset.label(), "Offset");
    }

    #[test]
    fn test_mode_serialization() {
        assert_eq!(
            serde_json::to_string(&SyncMode::Proportional).unwrap(),
            "\"proportional\""
        );
        assert_eq!(
            serde_json::to_string(&SyncMode::Offset).unwrap(),
            "\"offset\""
        );
    }

    #[test]
    fn test_mode_deserialization() {
        assert_eq!(
            serde_json::from_str::<SyncMode>("\"proportional\"").unwrap(),
            SyncMode::Proportional
        );
        assert_eq!(
            serde_json::from_str::<SyncMode>("\"offset\"").unwrap(),
            SyncMode::Offset
        );
    }

    #[test]
    fn test_settings_serialization_roundtrip() {
        let original = SyncSettings {
            enabled: false,
            mode: SyncMode::Offset,
        };
        let json = serde_json::to_string_pretty(&original).unwrap();
        let deserialized: SyncSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_settings_deserialize_with_defaults() {
        // Minimal JSON - should fill in defaults
        let json = r#"{"mode": "offset"}"#;
        let settings: SyncSettings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.mode, SyncMode::Offset);
        assert!(settings.enabled);
    }

    #[test]
    fn test_settings_deserialize_empty_json() {
        // Empty JSON object - should use all defaults
        let settings: SyncSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, SyncSettings::default());
    }

    #[test]
    fn test_settings_ignore_unknown_fields() {
        let json = r#"{"enabled": false, "future_feature": true}"#;
        let settings: SyncSettings = serde_json::from_str(json).unwrap();
        assert!(!settings.enabled);
    }

    #[test]
    fn test_status_label() {
        let mut settings = SyncSettings::default();
        assert_eq!(settings.status_label(), "Sync: on (Proportional)");

        settings.mode = SyncMode::Offset;
        assert_eq!(settings.status_label(), "Sync: on (Offset)");

        settings.enabled = false;
        assert_eq!(settings.status_label(), "Sync: off");
    }

    #[test]
    fn test_from_json_valid() {
        let settings = SyncSettings::from_json(r#"{"enabled": true, "mode": "offset"}"#).unwrap();
        assert!(settings.enabled);
        assert_eq!(settings.mode, SyncMode::Offset);
    }

    #[test]
    fn test_from_json_invalid_reports_parse_error() {
        let result = SyncSettings::from_json("{ not json }");
        assert!(matches!(
            result,
            Err(crate::error::Error::ConfigParse { .. })
        ));
    }

    #[test]
    fn test_from_json_rejects_wrong_types() {
        assert!(SyncSettings::from_json(r#"{"enabled": "yes"}"#).is_err());
        assert!(SyncSettings::from_json(r#"{"mode": "sideways"}"#).is_err());
    }
}
