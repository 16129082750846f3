//! Dashboard configuration.
//!
//! Settings are layered: built-in defaults, then an optional TOML
//! config file, then `BEATLYTICS_`-prefixed environment variables,
//! then explicit CLI flags on top.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::client::{FallbackPolicy, DEFAULT_API_BASE};

/// Default seconds between fetch cycles.
pub const DEFAULT_REFRESH_SECS: u64 = 30;

/// Resolved dashboard settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the analytics API.
    pub api_base: String,
    /// Seconds between fetch cycles.
    pub refresh_secs: u64,
    /// Surface fetch failures instead of substituting demo data.
    pub strict: bool,
    /// Where to write logs; logging is disabled when unset.
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            refresh_secs: DEFAULT_REFRESH_SECS,
            strict: false,
            log_file: None,
        }
    }
}

impl Settings {
    /// Load settings from an optional config file plus the environment.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("api_base", DEFAULT_API_BASE)?
            .set_default("refresh_secs", DEFAULT_REFRESH_SECS)?
            .set_default("strict", false)?;

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(Environment::with_prefix("BEATLYTICS"))
            .build()
            .context("failed to load configuration")?;

        config.try_deserialize().context("invalid configuration")
    }

    /// The fetch failure policy implied by these settings.
    pub fn fallback_policy(&self) -> FallbackPolicy {
        if self.strict {
            FallbackPolicy::Surface
        } else {
            FallbackPolicy::Mock
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.api_base, DEFAULT_API_BASE);
        assert_eq!(settings.refresh_secs, 30);
        assert!(!settings.strict);
        assert!(settings.log_file.is_none());
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            "api_base = \"http://analytics.internal:9000\"\nrefresh_secs = 5\nstrict = true"
        )
        .unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.api_base, "http://analytics.internal:9000");
        assert_eq!(settings.refresh_secs, 5);
        assert!(settings.strict);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        assert!(Settings::load(Some(Path::new("/nonexistent/beatlytics.toml"))).is_err());
    }

    #[test]
    fn test_fallback_policy() {
        let mut settings = Settings::default();
        assert_eq!(settings.fallback_policy(), FallbackPolicy::Mock);
        settings.strict = true;
        assert_eq!(settings.fallback_policy(), FallbackPolicy::Surface);
    }
}
