//! # Configuration State
//!
//! Shop and export settings, loaded once at startup.
//!
//! ## Configuration Sources (later wins)
//! 1. Defaults (this file)
//! 2. Config file (`--config PATH`, else the platform config directory)
//! 3. Environment variables (`FRAMEIT_*`)
//!
//! ```toml
//! brand = "FrameIt"
//! default_gst_rate = 18
//! output_dir = "/home/asha/Downloads"
//!
//! [business]
//! name = "PPS Photo Frames"
//! phone = "+91 9810774052"
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after loading, so no mutex needed.

use std::path::{Path, PathBuf};

use directories::{ProjectDirs, UserDirs};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use frameit_core::invoice::BusinessProfile;
use frameit_core::money::RUPEE_SYMBOL;
use frameit_core::validation::{validate_brand_name, validate_gst_rate};
use frameit_core::{ValidationError, DEFAULT_GST_RATE};
use frameit_export::DEFAULT_CURRENCY_LABEL;

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Brand used in export filenames when none is configured.
pub const DEFAULT_BRAND: &str = "FrameIt";

/// Errors while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value '{value}' for {var}")]
    Env { var: &'static str, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationError),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// Brand in `<brand>_Invoice_<bill number>.pdf`
    pub brand: String,

    /// Currency symbol for terminal output
    pub currency_symbol: String,

    /// Currency label for PDF text (built-in PDF fonts have no rupee sign)
    pub currency_label: String,

    /// GST percentage for new blank items
    pub default_gst_rate: f64,

    /// Where exported PDFs go; `None` means the downloads folder
    pub output_dir: Option<PathBuf>,

    /// Seller details printed on the invoice
    pub business: BusinessProfile,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            brand: DEFAULT_BRAND.to_string(),
            currency_symbol: RUPEE_SYMBOL.to_string(),
            currency_label: DEFAULT_CURRENCY_LABEL.to_string(),
            default_gst_rate: DEFAULT_GST_RATE as f64,
            output_dir: None,
            business: BusinessProfile::default(),
        }
    }
}

impl ConfigState {
    /// Loads configuration from all sources and validates it.
    ///
    /// An explicit `path` must exist; the platform default is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => ConfigState::default(),
            },
        };

        config.apply_env(|var| std::env::var(var).ok())?;
        config.validate()?;

        info!(brand = %config.brand, gst = config.default_gst_rate, "Configuration loaded");
        Ok(config)
    }

    /// Parses a TOML config file on top of the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Reading config file");
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Applies `FRAMEIT_*` overrides read through `lookup`.
    ///
    /// ## Environment Variables
    /// - `FRAMEIT_BRAND`: brand in export filenames
    /// - `FRAMEIT_OUTPUT_DIR`: directory for exported PDFs
    /// - `FRAMEIT_DEFAULT_GST`: GST percentage for new items (e.g. "12")
    /// - `FRAMEIT_BUSINESS_NAME`: business name on the invoice
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(brand) = lookup("FRAMEIT_BRAND") {
            self.brand = brand;
        }

        if let Some(dir) = lookup("FRAMEIT_OUTPUT_DIR") {
            self.output_dir = Some(PathBuf::from(dir));
        }

        if let Some(rate) = lookup("FRAMEIT_DEFAULT_GST") {
            self.default_gst_rate = rate.trim().parse().map_err(|_| ConfigError::Env {
                var: "FRAMEIT_DEFAULT_GST",
                value: rate.clone(),
            })?;
        }

        if let Some(name) = lookup("FRAMEIT_BUSINESS_NAME") {
            self.business.name = name;
        }

        Ok(())
    }

    /// Checks the brand and the default GST rate.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        self.brand = validate_brand_name(&self.brand)?;
        self.default_gst_rate = validate_gst_rate(self.default_gst_rate)?;
        Ok(())
    }

    /// The directory exported PDFs are written to.
    pub fn resolved_output_dir(&self) -> PathBuf {
        if let Some(dir) = &self.output_dir {
            return dir.clone();
        }
        UserDirs::new()
            .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// `<config dir>/config.toml` for this platform.
///
/// - **Linux**: `~/.config/billing/config.toml`
/// - **macOS**: `~/Library/Application Support/com.frameit.billing/config.toml`
/// - **Windows**: `%APPDATA%\frameit\billing\config\config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "frameit", "billing")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ConfigState::default();
        assert_eq!(config.brand, "FrameIt");
        assert_eq!(config.currency_symbol, "₹");
        assert_eq!(config.currency_label, "Rs.");
        assert_eq!(config.default_gst_rate, 18.0);
        assert_eq!(config.business.name, "PPS Photo Frames");
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let config = ConfigState::from_toml(
            r#"
            brand = "PPS"
            default_gst_rate = 12

            [business]
            name = "PPS Frames Gurugram"
            "#,
        )
        .unwrap();

        assert_eq!(config.brand, "PPS");
        assert_eq!(config.default_gst_rate, 12.0);
        assert_eq!(config.business.name, "PPS Frames Gurugram");
        // untouched keys keep their defaults
        assert_eq!(config.business.phone, "+91 9810774052");
        assert_eq!(config.currency_label, "Rs.");
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = ConfigState::from_toml("brand = \"PPS\"").unwrap();
        config
            .apply_env(env(&[
                ("FRAMEIT_BRAND", "Studio"),
                ("FRAMEIT_DEFAULT_GST", "5"),
                ("FRAMEIT_OUTPUT_DIR", "/tmp/bills"),
            ]))
            .unwrap();

        assert_eq!(config.brand, "Studio");
        assert_eq!(config.default_gst_rate, 5.0);
        assert_eq!(config.resolved_output_dir(), PathBuf::from("/tmp/bills"));
    }

    #[test]
    fn test_bad_env_gst_rejected() {
        let mut config = ConfigState::default();
        let err = config
            .apply_env(env(&[("FRAMEIT_DEFAULT_GST", "eighteen")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Env { var: "FRAMEIT_DEFAULT_GST", .. }));
    }

    #[test]
    fn test_validation() {
        let mut config = ConfigState {
            brand: "Frame It!".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = ConfigState {
            default_gst_rate: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            ConfigState::load(Some(&missing)),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "brand = \"PPS\"\n[business]\nstatus = \"Paid\"\n").unwrap();

        let config = ConfigState::from_file(&path).unwrap();
        assert_eq!(config.brand, "PPS");
        assert_eq!(config.business.status, "Paid");
    }
}
