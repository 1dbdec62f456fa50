use crate::domain::models::AppError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "video_recorder_config/video_recorder_config.json";
pub const CONFIG_PATH_ENV: &str = "RECORDER_KIT_CONFIG_PATH";

/// Source of the bundled JSON override. An empty string means "no override".
pub trait ConfigResource: Send + Sync {
    fn read_text(&self) -> Result<String, AppError>;
}

#[derive(Debug, Clone)]
pub struct FileConfigResource {
    path: PathBuf,
}

impl FileConfigResource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_env() -> Self {
        Self::new(config_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigResource for FileConfigResource {
    fn read_text(&self) -> Result<String, AppError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(content),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(error) => Err(AppError::new(
                "CONFIG_READ_FAIL",
                format!(
                    "failed to read recorder config {}: {error}",
                    self.path.display()
                ),
                Some(format!("check the file or set {CONFIG_PATH_ENV}")),
            )),
        }
    }
}

/// Config text compiled into the host binary.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigResource {
    text: String,
}

impl StaticConfigResource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl ConfigResource for StaticConfigResource {
    fn read_text(&self) -> Result<String, AppError> {
        Ok(self.text.clone())
    }
}

pub fn config_path() -> PathBuf {
    std::env::var(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
}
