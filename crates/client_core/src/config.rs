use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;
use url::Url;

use crate::transition::DEFAULT_TRANSITION_DURATION;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/";
pub const CONFIG_FILE_NAME: &str = "smart_hire.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid API base URL '{value}': {source}")]
    InvalidBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub api_base_url: Url,
    pub export_dir: Option<PathBuf>,
    pub transition_duration: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: default_base_url(),
            export_dir: None,
            transition_duration: DEFAULT_TRANSITION_DURATION,
        }
    }
}

impl ClientSettings {
    /// Configured export directory, else the user's download directory, else
    /// the working directory.
    pub fn resolved_export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .or_else(dirs::download_dir)
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn with_api_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.api_base_url = normalize_base_url(raw)?;
        Ok(self)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    export_dir: Option<PathBuf>,
    transition_ms: Option<u64>,
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_API_BASE_URL).expect("default API base URL should always parse")
}

pub fn load_settings() -> Result<ClientSettings, ConfigError> {
    load_settings_from(Path::new(CONFIG_FILE_NAME))
}

/// Defaults, then the TOML file at `path` if it exists, then environment.
pub fn load_settings_from(path: &Path) -> Result<ClientSettings, ConfigError> {
    let mut settings = ClientSettings::default();

    match fs::read_to_string(path) {
        Ok(raw) => {
            let file_cfg: FileSettings =
                toml::from_str(&raw).map_err(|source| ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?;
            apply_file_settings(&mut settings, file_cfg)?;
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok())?;
    Ok(settings)
}

fn apply_file_settings(
    settings: &mut ClientSettings,
    file_cfg: FileSettings,
) -> Result<(), ConfigError> {
    if let Some(v) = file_cfg.api_base_url {
        settings.api_base_url = normalize_base_url(&v)?;
    }
    if let Some(v) = file_cfg.export_dir {
        settings.export_dir = Some(v);
    }
    if let Some(v) = file_cfg.transition_ms {
        settings.transition_duration = Duration::from_millis(v);
    }
    Ok(())
}

fn apply_env_overrides(
    settings: &mut ClientSettings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    if let Some(v) = lookup("SMART_HIRE_API_URL") {
        settings.api_base_url = normalize_base_url(&v)?;
    }
    if let Some(v) = lookup("APP__API_BASE_URL") {
        settings.api_base_url = normalize_base_url(&v)?;
    }

    if let Some(v) = lookup("SMART_HIRE_EXPORT_DIR") {
        settings.export_dir = Some(PathBuf::from(v));
    }

    if let Some(v) = lookup("APP__TRANSITION_MS") {
        match v.trim().parse::<u64>() {
            Ok(parsed) => settings.transition_duration = Duration::from_millis(parsed),
            Err(_) => warn!(value = %v, "ignoring non-numeric APP__TRANSITION_MS"),
        }
    }

    Ok(())
}

/// Trims, adds `http://` when no scheme is given, and ensures a trailing
/// slash so endpoint paths join beneath the base instead of replacing its
/// last segment.
pub fn normalize_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(default_base_url());
    }

    let mut candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };
    if !candidate.ends_with('/') {
        candidate.push('/');
    }

    Url::parse(&candidate).map_err(|source| ConfigError::InvalidBaseUrl {
        value: raw.to_string(),
        source,
    })
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
