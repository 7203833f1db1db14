//! Configuration loading and saving.
//!
//! Lives at `~/.shiftline/config.toml`. A missing file means defaults; a present
//! but malformed file is an error so a typo never silently points the CLI at the
//! wrong sheet. Environment variables override file values.

use chrono_tz::Tz;
use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::api::Identity;
use crate::error::{Result, ShiftError};

pub const DEFAULT_TIMEZONE: &str = "Asia/Kolkata";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 300;

const ENV_API_URL: &str = "SHIFTLINE_API_URL";
const ENV_EMPLOYEE_ID: &str = "SHIFTLINE_EMPLOYEE_ID";
const ENV_TIMEZONE: &str = "SHIFTLINE_TIMEZONE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShiftlineConfig {
    /// Deployed web-app endpoint of the shift sheet.
    pub api_url: Option<String>,
    pub employee_id: Option<String>,
    pub employee_name: Option<String>,
    /// IANA zone used for "now" and for reading sheet timestamps.
    pub timezone: String,
    pub request_timeout_secs: u64,
    pub poll_interval_secs: u64,
}

impl Default for ShiftlineConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            employee_id: None,
            employee_name: None,
            timezone: DEFAULT_TIMEZONE.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        }
    }
}

impl ShiftlineConfig {
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| ShiftError::UnknownTimeZone(self.timezone.clone()))
    }

    pub fn api_url(&self) -> Result<&str> {
        self.api_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(ShiftError::ConfigMissing("api_url"))
    }

    pub fn identity(&self) -> Result<Identity> {
        let employee_id = self
            .employee_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or(ShiftError::ConfigMissing("employee_id"))?;
        Ok(Identity {
            employee_id: employee_id.to_string(),
            employee_name: self.employee_name.clone(),
        })
    }

    /// Applies `SHIFTLINE_*` overrides from `lookup` (normally `std::env::var`).
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_url = Some(url);
        }
        if let Some(id) = lookup(ENV_EMPLOYEE_ID) {
            self.employee_id = Some(id);
        }
        if let Some(tz) = lookup(ENV_TIMEZONE) {
            self.timezone = tz;
        }
        self
    }
}

/// Returns the path to the shiftline directory (~/.shiftline).
pub fn get_shiftline_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".shiftline"))
}

pub fn get_config_path() -> Option<PathBuf> {
    get_shiftline_dir().map(|d| d.join("config.toml"))
}

pub fn get_log_dir() -> Option<PathBuf> {
    get_shiftline_dir().map(|d| d.join("logs"))
}

/// Loads configuration from `path`, or the default location when `None`.
pub fn load_config(path: Option<PathBuf>) -> Result<ShiftlineConfig> {
    let config_path = match path {
        Some(path) => path,
        None => get_config_path().ok_or(ShiftError::HomeDirNotFound)?,
    };

    if !config_path.exists() {
        return Ok(ShiftlineConfig::default());
    }

    let content = fs::read_to_string(&config_path).map_err(|source| ShiftError::Io {
        context: format!("reading {}", config_path.display()),
        source,
    })?;
    toml::from_str::<ShiftlineConfig>(&content).map_err(|err| ShiftError::ConfigMalformed {
        path: config_path,
        details: err.to_string(),
    })
}

/// Writes configuration atomically (temp file + rename).
pub fn save_config(config: &ShiftlineConfig, path: &Path) -> Result<()> {
    let write_failed = |source: std::io::Error| ShiftError::ConfigWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_failed)?;
    }

    let content = toml::to_string_pretty(config).map_err(|err| ShiftError::ConfigMalformed {
        path: path.to_path_buf(),
        details: err.to_string(),
    })?;
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, content).map_err(write_failed)?;
    fs::rename(&tmp_path, path).map_err(write_failed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let config = load_config(Some(temp_dir.path().join("missing.toml"))).expect("load");
        assert_eq!(config, ShiftlineConfig::default());
        assert_eq!(config.tz().unwrap(), chrono_tz::Asia::Kolkata);
    }

    #[test]
    fn test_partial_file_keeps_defaults_for_the_rest() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
api_url = "https://script.example.com/exec"
employee_id = "EMP-9"
timezone = "Europe/Berlin"
"#,
        )
        .unwrap();

        let config = load_config(Some(path)).expect("load");
        assert_eq!(config.api_url().unwrap(), "https://script.example.com/exec");
        assert_eq!(config.identity().unwrap(), Identity::new("EMP-9"));
        assert_eq!(config.tz().unwrap(), chrono_tz::Europe::Berlin);
        assert_eq!(config.poll_interval_secs, DEFAULT_POLL_INTERVAL_SECS);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "api_url = [").unwrap();
        assert!(matches!(
            load_config(Some(path)),
            Err(ShiftError::ConfigMalformed { .. })
        ));
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let path = temp_dir.path().join("nested").join("config.toml");
        let config = ShiftlineConfig {
            employee_id: Some("EMP-1".to_string()),
            poll_interval_secs: 60,
            ..Default::default()
        };
        save_config(&config, &path).expect("save");
        assert_eq!(load_config(Some(path)).expect("load"), config);
    }

    #[test]
    fn test_missing_values_are_reported() {
        let config = ShiftlineConfig::default();
        assert!(matches!(
            config.api_url(),
            Err(ShiftError::ConfigMissing("api_url"))
        ));
        assert!(matches!(
            config.identity(),
            Err(ShiftError::ConfigMissing("employee_id"))
        ));
    }

    #[test]
    fn test_unknown_timezone() {
        let config = ShiftlineConfig {
            timezone: "Mars/Olympus".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.tz(), Err(ShiftError::UnknownTimeZone(_))));
    }

    #[test]
    fn test_env_overrides() {
        let config = ShiftlineConfig::default().with_overrides(|key| match key {
            "SHIFTLINE_EMPLOYEE_ID" => Some("EMP-42".to_string()),
            _ => None,
        });
        assert_eq!(config.employee_id.as_deref(), Some("EMP-42"));
        assert_eq!(config.api_url, None);
    }
}
