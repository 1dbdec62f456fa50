use crate::domain::models::AppError;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

pub fn audio_dir(output_root: &Path) -> PathBuf {
    output_root.join("audio")
}

pub fn audio_file_name(at: DateTime<Local>) -> String {
    format!("audio_{}.m4a", at.format("%Y%m%d_%H%M%S"))
}

/// Creates `<root>/audio` if needed and returns a timestamped `.m4a` path inside it.
pub fn default_audio_path(output_root: &Path) -> Result<PathBuf, AppError> {
    let dir = audio_dir(output_root);
    std::fs::create_dir_all(&dir).map_err(|error| {
        AppError::new(
            "IO_ERROR",
            format!("failed to create audio dir {}: {error}", dir.display()),
            Some("check path permissions".to_string()),
        )
    })?;
    Ok(dir.join(audio_file_name(Local::now())))
}

#[cfg(test)]
mod tests {
    use super::{audio_file_name, default_audio_path};
    use chrono::{Local, TimeZone};
    use tempfile::tempdir;

    #[test]
    fn audio_file_name_uses_timestamp() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(audio_file_name(at), "audio_20240309_070501.m4a");
    }

    #[test]
    fn default_audio_path_creates_directory() {
        let dir = tempdir().unwrap();
        let path = default_audio_path(dir.path()).unwrap();
        assert!(dir.path().join("audio").is_dir());
        assert_eq!(path.extension().and_then(|ext| ext.to_str()), Some("m4a"));
    }

    #[test]
    fn default_audio_path_fails_under_a_file() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();
        let error = default_audio_path(&blocker).unwrap_err();
        assert_eq!(error.code, "IO_ERROR");
    }
}
