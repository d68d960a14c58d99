//! Tool configuration module.
//!
//! Handles loading and validating `config.toml`. Configuration is optional:
//! with no file, stock defaults apply (baseline input formats, one worker
//! per CPU core, the built-in size catalog).
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [formats]
//! extended = false          # Also accept .webp input
//!
//! [processing]
//! max_workers = 4           # Max parallel workers (omit for auto = CPU cores)
//!
//! # Replace the built-in size catalog entirely (omit to keep it).
//! # Entries must be unique per (platform, variant) and per filename tag.
//! # [[sizes]]
//! # platform = "Discord"
//! # variant = "Small"
//! # width = 28
//! # height = 28
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::catalog::{Catalog, SizeSpec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Input format acceptance policy.
    pub formats: FormatsConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
    /// Replacement size catalog; empty means "use the built-in table".
    pub sizes: Vec<SizeSpec>,
}

impl AppConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config values beyond what serde enforces.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.sizes.is_empty() {
            Catalog::new(self.sizes.clone())
                .map_err(|e| ConfigError::Validation(e.to_string()))?;
        }
        if self.processing.max_workers == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_workers must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// The catalog this configuration selects: the `[[sizes]]` override if
    /// present, the built-in table otherwise.
    pub fn effective_catalog(&self) -> Result<Catalog, ConfigError> {
        if self.sizes.is_empty() {
            Ok(Catalog::builtin())
        } else {
            Catalog::new(self.sizes.clone()).map_err(|e| ConfigError::Validation(e.to_string()))
        }
    }
}

/// Which input file extensions are accepted at selection time.
///
/// This is a pure extension policy, not a content check: a malformed file
/// with an accepted extension passes selection and fails later at decode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatsConfig {
    /// Accept `.webp` in addition to the baseline jpg/jpeg/png/gif set.
    pub extended: bool,
}

const BASELINE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];
const EXTENDED_EXTENSIONS: &[&str] = &["webp"];

impl FormatsConfig {
    /// All accepted extensions under this policy, lowercase, in display order.
    pub fn allowed_extensions(&self) -> Vec<&'static str> {
        let mut extensions: Vec<&'static str> = BASELINE_EXTENSIONS.to_vec();
        if self.extended {
            extensions.extend_from_slice(EXTENDED_EXTENSIONS);
        }
        extensions
    }

    /// Whether `extension` (any case) is accepted.
    pub fn accepts(&self, extension: &str) -> bool {
        self.allowed_extensions()
            .iter()
            .any(|allowed| extension.eq_ignore_ascii_case(allowed))
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel transform workers.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_workers: Option<usize>,
}

/// Resolve the effective worker count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_workers(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_workers.map(|n| n.min(cores)).unwrap_or(cores)
}

/// A fully documented stock `config.toml` with every option at its default.
pub fn stock_config_toml() -> &'static str {
    r#"# emote-forge configuration. Every option is optional; defaults shown.

[formats]
# Also accept .webp input (baseline set is jpg/jpeg/png/gif).
extended = false

[processing]
# Maximum parallel transform workers. Omit for one per CPU core.
# max_workers = 4

# Replace the built-in size catalog entirely by listing [[sizes]] tables.
# Entries must be unique per (platform, variant); dimensions must be >= 1.
#
# [[sizes]]
# platform = "Discord"
# variant = "Small"
# width = 28
# height = 28
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_are_baseline_formats_and_builtin_catalog() {
        let config = AppConfig::default();
        assert!(!config.formats.extended);
        assert_eq!(config.processing.max_workers, None);
        assert_eq!(config.effective_catalog().unwrap(), Catalog::builtin());
    }

    #[test]
    fn baseline_accepts_images_not_video() {
        let formats = FormatsConfig::default();
        assert!(formats.accepts("jpg"));
        assert!(formats.accepts("JPEG"));
        assert!(formats.accepts("png"));
        assert!(formats.accepts("gif"));
        assert!(!formats.accepts("webp"));
        assert!(!formats.accepts("mp4"));
        assert!(!formats.accepts("webm"));
    }

    #[test]
    fn extended_adds_webp_only() {
        let formats = FormatsConfig { extended: true };
        assert!(formats.accepts("webp"));
        assert!(formats.accepts("WEBP"));
        assert!(!formats.accepts("webm"));
        assert_eq!(
            formats.allowed_extensions(),
            vec!["jpg", "jpeg", "png", "gif", "webp"]
        );
    }

    #[test]
    fn load_partial_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[formats]\nextended = true\n").unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert!(config.formats.extended);
        assert_eq!(config.processing.max_workers, None);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<AppConfig, _> = toml::from_str("[formats]\nextendd = true\n");
        assert!(result.is_err());
    }

    #[test]
    fn zero_workers_rejected() {
        let config = AppConfig {
            processing: ProcessingConfig {
                max_workers: Some(0),
            },
            ..AppConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn workers_clamped_to_cores() {
        let config = ProcessingConfig {
            max_workers: Some(10_000),
        };
        let cores = std::thread::available_parallelism().unwrap().get();
        assert_eq!(effective_workers(&config), cores);
    }

    #[test]
    fn workers_auto_uses_cores() {
        let cores = std::thread::available_parallelism().unwrap().get();
        assert_eq!(effective_workers(&ProcessingConfig::default()), cores);
    }

    #[test]
    fn sizes_override_replaces_builtin() {
        let toml = r#"
            [[sizes]]
            platform = "Slack"
            variant = "Standard"
            width = 128
            height = 128
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        config.validate().unwrap();
        let catalog = config.effective_catalog().unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.specs()[0].platform, "Slack");
    }

    #[test]
    fn invalid_sizes_override_fails_validation() {
        let toml = r#"
            [[sizes]]
            platform = "Slack"
            variant = "Standard"
            width = 0
            height = 128
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: AppConfig = toml::from_str(stock_config_toml()).unwrap();
        assert!(!config.formats.extended);
        assert_eq!(config.processing.max_workers, None);
        assert!(config.sizes.is_empty());
    }
}
