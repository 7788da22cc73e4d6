//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::path::PathBuf;
use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub resources: ResourceSettings,
    pub cache: CacheSettings,
    pub query: QuerySettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceSettings {
    dir: String,
    pub prefer_compiled: bool,
}

impl ResourceSettings {
    /// Configured resource directory, `None` when only built-in resources are used.
    pub fn dir(&self) -> Option<PathBuf> {
        let dir = self.dir.trim();
        (!dir.is_empty()).then(|| PathBuf::from(dir))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub paradigms: bool,
    pub capacity: usize,
}

impl CacheSettings {
    /// Cache capacity if paradigm caching is enabled.
    pub fn effective_capacity(&self) -> Option<usize> {
        self.paradigms.then_some(self.capacity)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuerySettings {
    pub max_completions: usize,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive_usize {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }

    check_positive_usize!(cache.capacity);
    check_positive_usize!(query.max_completions);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.resources.dir(), None);
        assert!(s.resources.prefer_compiled);
        assert!(s.cache.paradigms);
        assert_eq!(s.cache.capacity, 4096);
        assert_eq!(s.cache.effective_capacity(), Some(4096));
        assert_eq!(s.query.max_completions, 20);
    }

    #[test]
    fn parse_valid_custom_toml() {
        let toml = r#"
[resources]
dir = "/usr/share/morph"
prefer_compiled = false

[cache]
paradigms = false
capacity = 16

[query]
max_completions = 5
"#;
        let s = parse_settings_toml(toml).unwrap();
        assert_eq!(s.resources.dir(), Some(PathBuf::from("/usr/share/morph")));
        assert!(!s.resources.prefer_compiled);
        assert_eq!(s.cache.effective_capacity(), None);
        assert_eq!(s.query.max_completions, 5);
    }

    #[test]
    fn error_zero_capacity() {
        let toml = r#"
[resources]
dir = ""
prefer_compiled = true

[cache]
paradigms = true
capacity = 0

[query]
max_completions = 20
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
        assert!(err.to_string().contains("cache.capacity"));
    }

    #[test]
    fn error_zero_completions() {
        let toml = r#"
[resources]
dir = ""
prefer_compiled = true

[cache]
paradigms = true
capacity = 10

[query]
max_completions = 0
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(err.to_string().contains("query.max_completions"));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_settings_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_missing_section() {
        let toml = r#"
[cache]
paradigms = true
capacity = 10
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
