//! # Console configuration: `console.toml`
//!
//! Where the record store lives and how resident photos are captured.
//!
//! ```toml
//! [record_store]
//! url = "https://project.supabase.co"
//! api_key = "public-anon-key"
//!
//! [photo]
//! max_edge = 640       # longest edge of a stored photo, in pixels
//! jpeg_quality = 85    # 1-100
//! ```
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`ConsoleConfig`] | Top-level config with TOML (de)serialisation, env overrides and the canonical filename. |
//! | [`RecordStoreConfig`] | Backend base URL and public API key. An empty URL selects the in-memory demo store. |
//! | [`PhotoConfig`] | Photo pipeline limits, defaulting to **640 px** and quality **85**. |
//!
//! Every section derives `Default`, so a missing or partial file is equivalent
//! to the defaults for whatever it leaves out.

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `console.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub record_store: RecordStoreConfig,
    #[serde(default)]
    pub photo: PhotoConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordStoreConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub api_key: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhotoConfig {
    #[serde(default = "default_max_edge")]
    pub max_edge: u32,
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

fn default_max_edge() -> u32 {
    640
}

fn default_jpeg_quality() -> u8 {
    85
}

impl Default for PhotoConfig {
    fn default() -> Self {
        Self {
            max_edge: default_max_edge(),
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

impl ConsoleConfig {
    /// Config pointing at a hosted record store.
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            record_store: RecordStoreConfig {
                url: url.into(),
                api_key: api_key.into(),
            },
            photo: PhotoConfig::default(),
        }
    }

    /// Builder method to set the photo limits.
    pub fn with_photo(mut self, max_edge: u32, jpeg_quality: u8) -> Self {
        self.photo = PhotoConfig {
            max_edge,
            jpeg_quality,
        };
        self
    }

    /// Replace the store settings with any non-empty override.
    pub fn with_overrides(mut self, url: Option<String>, api_key: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.record_store.url = url.trim().to_string();
        }
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.record_store.api_key = key.trim().to_string();
        }
        self
    }

    /// True when no backend is configured and the demo store should be used.
    pub fn is_demo(&self) -> bool {
        self.record_store.url.trim().is_empty()
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "console.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConsoleConfig::default();
        assert!(config.is_demo());
        assert_eq!(config.photo.max_edge, 640);
        assert_eq!(config.photo.jpeg_quality, 85);
    }

    #[test]
    fn test_parse_full_config() {
        let config = ConsoleConfig::from_toml(
            r#"
[record_store]
url = "https://demo.supabase.co"
api_key = "anon"

[photo]
max_edge = 320
jpeg_quality = 70
"#,
        )
        .unwrap();
        assert_eq!(
            config,
            ConsoleConfig::new("https://demo.supabase.co", "anon").with_photo(320, 70)
        );
        assert!(!config.is_demo());
    }

    #[test]
    fn test_parse_partial_config() {
        let config = ConsoleConfig::from_toml("[photo]\nmax_edge = 1024\n").unwrap();
        assert!(config.is_demo());
        assert_eq!(config.photo.max_edge, 1024);
        assert_eq!(config.photo.jpeg_quality, 85);

        assert_eq!(ConsoleConfig::from_toml("").unwrap(), ConsoleConfig::default());
    }

    #[test]
    fn test_overrides_ignore_blank_values() {
        let config = ConsoleConfig::new("https://a.example", "k1").with_overrides(
            Some("  ".to_string()),
            Some("k2".to_string()),
        );
        assert_eq!(config.record_store.url, "https://a.example");
        assert_eq!(config.record_store.api_key, "k2");
    }

    #[test]
    fn test_roundtrip() {
        let config = ConsoleConfig::new("https://a.example", "key");
        let parsed = ConsoleConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }
}
