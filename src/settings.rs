//! Effect settings and preferences
//!
//! Read from a JSON `<script id="fx-settings">` block on the page.

use serde::{Deserialize, Serialize};

use crate::fx::{DecryptConfig, MarqueeConfig, ProximityConfig};

/// Page-wide effect settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    // === Accessibility ===
    /// Reduced motion (mount static markup, never animate)
    pub reduced_motion: bool,

    // === Diagnostics ===
    /// Console log level ("error", "warn", "info", "debug", "trace")
    pub log_level: String,

    // === Effect defaults ===
    /// Defaults for `data-fx="decrypt"` elements
    pub decrypt: DecryptConfig,
    /// Defaults for `data-fx="scramble"` elements
    pub scramble: ProximityConfig,
    /// Defaults for `data-fx="logo-loop"` elements
    pub logo_loop: MarqueeConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            log_level: "info".to_string(),
            decrypt: DecryptConfig::default(),
            scramble: ProximityConfig::default(),
            logo_loop: MarqueeConfig::default(),
        }
    }
}

impl Settings {
    /// Element id of the settings block
    pub const ELEMENT_ID: &'static str = "fx-settings";

    /// Parse settings JSON; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Log level, falling back to info for unknown names
    pub fn level(&self) -> log::Level {
        match self.log_level.to_lowercase().as_str() {
            "error" => log::Level::Error,
            "warn" | "warning" => log::Level::Warn,
            "debug" => log::Level::Debug,
            "trace" => log::Level::Trace,
            _ => log::Level::Info,
        }
    }

    /// Settings from an optional settings block; no block means defaults
    pub fn resolve(json: Option<&str>) -> Result<Self, serde_json::Error> {
        json.map_or_else(|| Ok(Self::default()), Self::from_json)
    }

    /// Load settings from the page (WASM only).
    ///
    /// Runs before the logger exists, so a bad block is returned rather than
    /// logged here.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Result<Self, serde_json::Error> {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());
        Self::resolve(json.as_deref())
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self, serde_json::Error> {
        Ok(Self::default())
    }
}

/// Overlay per-element JSON options onto `base`.
///
/// Keys present in `json` replace the base values; everything else is kept.
pub fn merge_options<T>(base: &T, json: &str) -> Result<T, serde_json::Error>
where
    T: Serialize + serde::de::DeserializeOwned,
{
    let mut value = serde_json::to_value(base)?;
    let overrides: serde_json::Value = serde_json::from_str(json)?;
    if let (Some(target), serde_json::Value::Object(fields)) = (value.as_object_mut(), overrides) {
        for (key, v) in fields {
            target.insert(key, v);
        }
    }
    serde_json::from_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fx::{RevealOrder, TriggerPolicy};

    #[test]
    fn test_partial_settings_keep_defaults() {
        let settings =
            Settings::from_json(r#"{"reducedMotion": true, "decrypt": {"tickIntervalMs": 50}}"#)
                .unwrap();
        assert!(settings.reduced_motion);
        assert_eq!(settings.decrypt.tick_interval_ms, 50.0);
        assert_eq!(settings.decrypt.max_random_iterations, 10);
        assert_eq!(settings.logo_loop, MarqueeConfig::default());
    }

    #[test]
    fn test_missing_block_resolves_to_defaults() {
        assert_eq!(Settings::resolve(None).unwrap(), Settings::default());
        assert_eq!(Settings::load().unwrap(), Settings::default());
    }

    #[test]
    fn test_bad_block_is_reported_not_swallowed() {
        let err = Settings::resolve(Some(r#"{"reducedMotion": "yes"}"#));
        assert!(err.is_err());
        let ok = Settings::resolve(Some(r#"{"logLevel": "debug"}"#)).unwrap();
        assert_eq!(ok.level(), log::Level::Debug);
    }

    #[test]
    fn test_invalid_settings_error() {
        assert!(Settings::from_json("{not json").is_err());
    }

    #[test]
    fn test_level_parsing() {
        let mut settings = Settings::default();
        assert_eq!(settings.level(), log::Level::Info);
        settings.log_level = "DEBUG".into();
        assert_eq!(settings.level(), log::Level::Debug);
        settings.log_level = "loud".into();
        assert_eq!(settings.level(), log::Level::Info);
    }

    #[test]
    fn test_merge_options_overrides_base() {
        let base = DecryptConfig {
            tick_interval_ms: 80.0,
            ..Default::default()
        };
        let merged = merge_options(&base, r#"{"revealOrder": "end", "trigger": "both"}"#).unwrap();
        assert_eq!(merged.tick_interval_ms, 80.0);
        assert_eq!(merged.reveal_order, RevealOrder::End);
        assert_eq!(merged.trigger, TriggerPolicy::HoverViewportOnce);
    }

    #[test]
    fn test_merge_options_rejects_bad_values() {
        let base = DecryptConfig::default();
        assert!(merge_options(&base, r#"{"revealOrder": "sideways"}"#).is_err());
    }
}
