use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// File read from the working directory when `--config` is not given.
pub const DEFAULT_SETTINGS_FILE: &str = "ros-netconf.toml";

/// Overrides `[device].password`.
pub const PASSWORD_ENV: &str = "ROS_NETCONF_PASSWORD";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub device: DeviceSettings,
    pub verify: VerifySettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeviceSettings {
    pub address: String,
    pub username: String,
    pub password: String,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            address: "192.168.88.1:8728".to_string(),
            username: "admin".to_string(),
            password: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VerifySettings {
    pub settle_delay_ms: u64,
    pub field_mappings: Option<PathBuf>,
}

impl Default for VerifySettings {
    fn default() -> Self {
        Self {
            settle_delay_ms: 1000,
            field_mappings: None,
        }
    }
}

impl VerifySettings {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

impl AppSettings {
    /// Apply the password environment override, if set.
    pub fn with_password_override(mut self, password: Option<String>) -> Self {
        if let Some(password) = password {
            self.device.password = password;
        }
        self
    }
}

/// Load settings from an explicit path, or from [`DEFAULT_SETTINGS_FILE`]
/// when it exists. Missing default file means all defaults.
pub fn load_settings(path: Option<&Path>) -> Result<AppSettings, SettingsError> {
    let settings = match path {
        Some(path) => load_settings_file(path)?,
        None => {
            let default = Path::new(DEFAULT_SETTINGS_FILE);
            if default.is_file() {
                load_settings_file(default)?
            } else {
                AppSettings::default()
            }
        }
    };
    Ok(settings.with_password_override(std::env::var(PASSWORD_ENV).ok()))
}

fn load_settings_file(path: &Path) -> Result<AppSettings, SettingsError> {
    let raw = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_settings(&raw, path)
}

fn parse_settings(raw: &str, path: &Path) -> Result<AppSettings, SettingsError> {
    toml::from_str(raw).map_err(|source| SettingsError::Parse {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;
    use std::time::Duration;

    use tempfile::tempdir;

    use super::{load_settings, parse_settings, AppSettings, SettingsError};

    #[test]
    fn empty_file_is_all_defaults() {
        let settings = parse_settings("", Path::new("x.toml")).expect("settings");
        assert_eq!(settings, AppSettings::default());
        assert_eq!(settings.device.username, "admin");
        assert_eq!(settings.verify.settle_delay(), Duration::from_millis(1000));
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let settings = parse_settings(
            r#"
[device]
address = "10.0.0.1:8728"

[verify]
settle_delay_ms = 0
field_mappings = "fields.toml"
"#,
            Path::new("x.toml"),
        )
        .expect("settings");

        assert_eq!(settings.device.address, "10.0.0.1:8728");
        assert_eq!(settings.device.username, "admin");
        assert_eq!(settings.verify.settle_delay_ms, 0);
        assert_eq!(
            settings.verify.field_mappings.as_deref(),
            Some(Path::new("fields.toml"))
        );
    }

    #[test]
    fn password_override_replaces_file_value() {
        let settings = parse_settings("[device]\npassword = \"file\"", Path::new("x.toml"))
            .expect("settings")
            .with_password_override(Some("env".to_string()));
        assert_eq!(settings.device.password, "env");

        let untouched = AppSettings::default().with_password_override(None);
        assert_eq!(untouched.device.password, "");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempdir().expect("tempdir");
        let err = load_settings(Some(&dir.path().join("absent.toml"))).expect_err("missing");
        assert!(matches!(err, SettingsError::Io { .. }));
    }

    #[test]
    fn invalid_toml_reports_path() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[device\n").expect("write");

        let err = load_settings(Some(&path)).expect_err("broken");
        assert!(err.to_string().contains("broken.toml"));
    }
}
