use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use recipe_logging::{recipe_info, recipe_warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

pub(crate) const PREFERENCES_FILENAME: &str = ".recipe_prefs.ron";

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("state directory unusable: {0}")]
    StateDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid preferences file: {0}")]
    Parse(String),
    #[error("could not serialize preferences: {0}")]
    Serialize(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// `None` until the user picks a theme.
    pub dark_mode: Option<bool>,
    pub saved_utc: Option<String>,
}

/// Reads saved preferences; a missing file yields the defaults.
pub fn load_preferences(dir: &Path) -> Result<Preferences, PreferenceError> {
    let path = dir.join(PREFERENCES_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Preferences::default()),
        Err(err) => return Err(err.into()),
    };
    ron::from_str(&content).map_err(|err| PreferenceError::Parse(err.to_string()))
}

/// Loads preferences, falling back to defaults when the file is unreadable.
pub fn load_or_default(dir: &Path) -> Preferences {
    match load_preferences(dir) {
        Ok(prefs) => prefs,
        Err(err) => {
            recipe_warn!("Ignoring preferences in {:?}: {}", dir, err);
            Preferences::default()
        }
    }
}

pub fn save_dark_mode(dir: &Path, dark_mode: bool) -> Result<PathBuf, PreferenceError> {
    let prefs = Preferences {
        dark_mode: Some(dark_mode),
        saved_utc: Some(Utc::now().to_rfc3339()),
    };
    let content = ron::ser::to_string_pretty(&prefs, ron::ser::PrettyConfig::new())
        .map_err(|err| PreferenceError::Serialize(err.to_string()))?;
    let path = write_atomic(dir, PREFERENCES_FILENAME, &content)?;
    recipe_info!("Saved theme preference dark_mode={} to {:?}", dark_mode, path);
    Ok(path)
}

/// Writes `{dir}/{filename}` through a temp file and rename.
fn write_atomic(dir: &Path, filename: &str, content: &str) -> Result<PathBuf, PreferenceError> {
    if dir.exists() {
        if !dir.is_dir() {
            return Err(PreferenceError::StateDir(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PreferenceError::StateDir(e.to_string()))?;
    }

    let target = dir.join(filename);
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(&target).map_err(|e| PreferenceError::Io(e.error))?;
    Ok(target)
}

/// Terminal background hint from `COLORFGBG` ("fg;bg"); low background
/// indices are dark colours.
pub fn platform_prefers_dark(colorfgbg: Option<&str>) -> bool {
    colorfgbg
        .and_then(|value| value.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok())
        .is_some_and(|bg| bg < 7)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_preferences(dir.path()).unwrap(), Preferences::default());
    }

    #[test]
    fn saved_theme_is_loaded_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_dark_mode(dir.path(), true).unwrap();
        assert_eq!(path, dir.path().join(PREFERENCES_FILENAME));

        let prefs = load_preferences(dir.path()).unwrap();
        assert_eq!(prefs.dark_mode, Some(true));
        assert!(prefs.saved_utc.is_some());

        save_dark_mode(dir.path(), false).unwrap();
        assert_eq!(load_preferences(dir.path()).unwrap().dark_mode, Some(false));
    }

    #[test]
    fn creates_missing_state_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        save_dark_mode(&nested, true).unwrap();
        assert_eq!(load_or_default(&nested).dark_mode, Some(true));
    }

    #[test]
    fn corrupt_file_is_reported_and_defaulted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(PREFERENCES_FILENAME), "not ron (").unwrap();
        assert!(matches!(
            load_preferences(dir.path()),
            Err(PreferenceError::Parse(_))
        ));
        assert_eq!(load_or_default(dir.path()), Preferences::default());
    }

    #[test]
    fn old_file_without_timestamp_still_loads() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(PREFERENCES_FILENAME), "(dark_mode: Some(false))").unwrap();
        assert_eq!(load_preferences(dir.path()).unwrap().dark_mode, Some(false));
    }

    #[test]
    fn colorfgbg_background_decides_platform_theme() {
        assert!(platform_prefers_dark(Some("15;0")));
        assert!(platform_prefers_dark(Some("15;default;0")));
        assert!(!platform_prefers_dark(Some("0;15")));
        assert!(!platform_prefers_dark(Some("garbage")));
        assert!(!platform_prefers_dark(None));
    }
}
