use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{PREVIEW_GRAPHEMES, Theme};

pub const CONFIG_ENV_VAR: &str = "DAYNOTES_CONFIG";

pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed config file {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unusable date_format {format:?} in config file {path:?}")]
    DateFormat { path: PathBuf, format: String },
}

/// Whether chrono can format dates with `format` without erroring.
pub fn is_valid_date_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// User-facing strings, so the window can be shown in another language.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub app_title: String,
    pub today: String,
    pub yesterday: String,
    /// Footer summary; `{count}` is replaced by the number of notes.
    pub note_count: String,
    pub title_placeholder: String,
    pub content_placeholder: String,
    pub edit: String,
    pub delete: String,
    pub cancel: String,
    pub save: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            app_title: "Notes".into(),
            today: "Today".into(),
            yesterday: "Yesterday".into(),
            note_count: "{count} notes".into(),
            title_placeholder: "Title".into(),
            content_placeholder: "Content".into(),
            edit: "Edit".into(),
            delete: "Delete".into(),
            cancel: "Cancel".into(),
            save: "Save".into(),
        }
    }
}

impl Labels {
    pub fn note_count(&self, count: usize) -> String {
        self.note_count.replace("{count}", &count.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub theme: Theme,
    pub date_format: String,
    pub labels: Labels,
    pub preview_graphemes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            date_format: DEFAULT_DATE_FORMAT.into(),
            labels: Labels::default(),
            preview_graphemes: PREVIEW_GRAPHEMES,
        }
    }
}

impl AppConfig {
    /// Loads from `$DAYNOTES_CONFIG` if set, else from the platform config
    /// directory. A missing file gives the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(crate::util::config_path);
        Self::load_from(path)
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No config file at {:?}, using defaults", path);
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if !is_valid_date_format(&config.date_format) {
            return Err(ConfigError::DateFormat {
                path: path.to_path_buf(),
                format: config.date_format,
            });
        }
        info!("Loaded config from {:?}", path);

        Ok(config)
    }
}
