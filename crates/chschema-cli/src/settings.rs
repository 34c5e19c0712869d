use std::path::{Path, PathBuf};

use chschema_catalog::ApiSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_OUTPUT_PATH: &str = "./CHInheritanceTreeOutput.txt";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file not found: {0}")]
    Missing(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Contents of the settings file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub api: ApiSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

/// Load settings from a TOML file. The file is required.
pub fn load_settings(path: &Path) -> SettingsResult<Settings> {
    if !path.exists() {
        return Err(SettingsError::Missing(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    parse_settings(&content)
}

pub fn parse_settings(content: &str) -> SettingsResult<Settings> {
    Ok(toml::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[api]
url = "https://tenant.stylelabs.cloud/"
client_id = "client"
client_secret = "secret"
username = "admin"
password = "pass"
"#;

    #[test]
    fn applies_defaults() {
        let settings = parse_settings(MINIMAL).expect("parse settings");

        assert!(settings.api.include_conditional_members);
        assert_eq!(settings.api.timeout_secs, 60);
        assert_eq!(settings.output.path, PathBuf::from(DEFAULT_OUTPUT_PATH));
    }

    #[test]
    fn reads_overrides() {
        let content = format!(
            "{MINIMAL}include_conditional_members = false\n\n[output]\npath = \"out/schema.txt\"\n"
        );
        let settings = parse_settings(&content).expect("parse settings");

        assert!(!settings.api.include_conditional_members);
        assert_eq!(settings.output.path, PathBuf::from("out/schema.txt"));
    }

    #[test]
    fn missing_credentials_fail() {
        let err = parse_settings("[api]\nurl = \"https://x/\"\n").unwrap_err();
        assert!(matches!(err, SettingsError::TomlDecode(_)));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_settings(Path::new("definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, SettingsError::Missing(_)));
    }
}
