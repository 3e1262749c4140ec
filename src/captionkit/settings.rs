//! Environment-backed global settings.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionKitSettings {
    /// Directory joined onto relative vocabulary paths.
    /// When unset, relative paths are used as given.
    pub vocab_cache_dir: Option<PathBuf>,

    /// Permit building a vocabulary with zero surviving words.
    /// Off by default; an all-dropped corpus is treated as an error.
    pub allow_empty_vocab: bool,
}

impl Default for CaptionKitSettings {
    fn default() -> Self {
        Self {
            vocab_cache_dir: None,
            allow_empty_vocab: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestingSettings {
    /// Run consistency tests even on non-reference platforms.
    pub force_consistency_tests: bool,

    /// Set by CI systems (e.g. GitHub Actions).
    pub ci: bool,
}

impl Default for TestingSettings {
    fn default() -> Self {
        Self {
            force_consistency_tests: false,
            ci: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub captionkit: CaptionKitSettings,
    pub testing: TestingSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            captionkit: CaptionKitSettings::default(),
            testing: TestingSettings::default(),
        }
    }
}

impl Settings {
    /// Layers defaults, a `.env` file when present, and `CAPTIONKIT_`-prefixed
    /// environment variables (`__` separates sections).
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("captionkit.vocab_cache_dir", None::<String>)?
            .set_default("captionkit.allow_empty_vocab", false)?
            .set_default("testing.force_consistency_tests", false)?
            .set_default("testing.ci", false)?
            .add_source(File::with_name(".env").required(false))
            .add_source(Environment::with_prefix("CAPTIONKIT").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}

static SETTINGS: OnceLock<Settings> = OnceLock::new();

/// The process-wide settings, resolved once on first access. Resolution
/// failures fall back to the defaults.
pub fn settings() -> &'static Settings {
    SETTINGS.get_or_init(|| Settings::new().unwrap_or_else(|_| Settings::default()))
}
