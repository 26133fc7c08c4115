use crate::error::Result;
use crate::services::store::{project_dirs, DEFAULT_RULES_CACHE_KEY};
use crate::types::{ExtractOptions, Mode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Remote rules document consulted before the cache.
pub const DEFAULT_RULES_URL: &str = "https://raw.githubusercontent.com/jacobsfootmib-ux/upperdeck-epack-export/main/rules.json";

/// Export settings, read from `config.json` in the platform config dir.
///
/// Every field has a default, so a partial file is fine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub rules_url: Option<String>,
    pub rules_cache_key: String,
    /// Skip the remote rules tier.
    pub offline: bool,
    pub physical_checkmark_means_yes: bool,
    pub icon_flags: bool,
    pub out_dir: Option<PathBuf>,
    pub timeout_ms: u64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            rules_url: Some(DEFAULT_RULES_URL.to_string()),
            rules_cache_key: DEFAULT_RULES_CACHE_KEY.to_string(),
            offline: false,
            physical_checkmark_means_yes: false,
            icon_flags: true,
            out_dir: None,
            timeout_ms: 15_000,
        }
    }
}

impl ExportConfig {
    /// Path of the user config file.
    pub fn default_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.json"))
    }

    /// Load from the user config file, defaults when it does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let body = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Rules URL for this run; `None` when offline or unset.
    pub fn remote_rules_url(&self) -> Option<String> {
        if self.offline {
            return None;
        }
        self.rules_url.clone().filter(|u| !u.trim().is_empty())
    }

    pub fn extract_options(&self, mode: Mode) -> ExtractOptions {
        ExtractOptions {
            mode,
            physical_checkmark_means_yes: self.physical_checkmark_means_yes,
            icon_flags: self.icon_flags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = ExportConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(cfg, ExportConfig::default());
        assert_eq!(cfg.rules_cache_key, "epack_serial_rules_v1");
        assert_eq!(cfg.timeout_ms, 15_000);
        assert!(cfg.icon_flags);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"offline": true, "icon_flags": false}"#).unwrap();

        let cfg = ExportConfig::load_from(&path).unwrap();
        assert!(cfg.offline);
        assert!(!cfg.icon_flags);
        assert_eq!(cfg.remote_rules_url(), None);
        assert_eq!(cfg.timeout_ms, 15_000);

        let opts = cfg.extract_options(Mode::Checklist);
        assert_eq!(opts.mode, Mode::Checklist);
        assert!(!opts.icon_flags);
    }

    #[test]
    fn test_blank_rules_url_is_ignored() {
        let cfg = ExportConfig {
            rules_url: Some("  ".into()),
            ..ExportConfig::default()
        };
        assert_eq!(cfg.remote_rules_url(), None);
        assert!(ExportConfig::default().remote_rules_url().is_some());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ nope").unwrap();
        assert!(ExportConfig::load_from(&path).is_err());
    }
}
