//! Workbench settings file.
//!
//! # Responsibility
//! - Parse the TOML settings table into [`WorkbenchSettings`].
//! - Validate values with the same rules the logging bootstrap applies.
//!
//! # Invariants
//! - Every key is optional; a missing key takes its default.

use crate::logging::{default_log_level, normalize_level};
use crate::service::template_service::TEMPLATE_FILE_NAME;
use crate::store::PROJECT_EXTENSION;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum SettingsError {
    Read { path: PathBuf, source: std::io::Error },
    Parse(toml::de::Error),
    InvalidLevel(String),
    RelativeLogDir(PathBuf),
    InvalidExtension(String),
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read settings `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid settings file: {err}"),
            Self::InvalidLevel(level) => write!(f, "unsupported log level `{level}`"),
            Self::RelativeLogDir(path) => {
                write!(f, "log_dir must be an absolute path, got `{}`", path.display())
            }
            Self::InvalidExtension(ext) => write!(f, "invalid project extension `{ext}`"),
        }
    }
}

impl Error for SettingsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for SettingsError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkbenchSettings {
    pub log_level: String,
    /// Absolute directory for rolling log files; logging stays off when unset.
    pub log_dir: Option<PathBuf>,
    pub project_extension: String,
    /// Template library file, resolved against `data_dir` when relative.
    pub template_file: PathBuf,
    pub data_dir: Option<PathBuf>,
}

impl Default for WorkbenchSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: None,
            project_extension: PROJECT_EXTENSION.to_string(),
            template_file: PathBuf::from(TEMPLATE_FILE_NAME),
            data_dir: None,
        }
    }
}

impl WorkbenchSettings {
    /// Parses and validates a settings document.
    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        let mut settings: Self = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads `path`; a missing file yields validated defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Normalizes the level and checks paths and the extension.
    pub fn validate(&mut self) -> Result<(), SettingsError> {
        self.log_level = normalize_level(&self.log_level)
            .map_err(|_| SettingsError::InvalidLevel(self.log_level.clone()))?
            .to_string();

        if let Some(dir) = &self.log_dir {
            if !dir.is_absolute() {
                return Err(SettingsError::RelativeLogDir(dir.clone()));
            }
        }

        let extension = self.project_extension.trim().trim_start_matches('.');
        if extension.is_empty() || extension.contains(['/', '\\', '.']) {
            return Err(SettingsError::InvalidExtension(
                self.project_extension.clone(),
            ));
        }
        self.project_extension = extension.to_string();
        Ok(())
    }

    /// Location of the template library file.
    pub fn template_path(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) if self.template_file.is_relative() => dir.join(&self.template_file),
            _ => self.template_file.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SettingsError, WorkbenchSettings};
    use std::path::PathBuf;

    #[test]
    fn empty_document_gives_defaults() {
        let settings = WorkbenchSettings::from_toml_str("").unwrap();
        assert_eq!(settings.project_extension, "mnproj");
        assert_eq!(settings.template_file, PathBuf::from("WorldTemplate.xml"));
        assert!(settings.log_dir.is_none());
    }

    #[test]
    fn level_is_normalized() {
        let settings = WorkbenchSettings::from_toml_str("log_level = \" Warning \"").unwrap();
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(matches!(
            WorkbenchSettings::from_toml_str("log_level = \"loud\""),
            Err(SettingsError::InvalidLevel(_))
        ));
        assert!(matches!(
            WorkbenchSettings::from_toml_str("log_dir = \"logs\""),
            Err(SettingsError::RelativeLogDir(_))
        ));
        assert!(matches!(
            WorkbenchSettings::from_toml_str("project_extension = \"a.b\""),
            Err(SettingsError::InvalidExtension(_))
        ));
        assert!(matches!(
            WorkbenchSettings::from_toml_str("unknown = 1"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn template_path_joins_data_dir() {
        let settings = WorkbenchSettings::from_toml_str("data_dir = \"/srv/mono\"").unwrap();
        assert_eq!(
            settings.template_path(),
            PathBuf::from("/srv/mono/WorldTemplate.xml")
        );
    }
}
