//! User-directory resolution.
//!
//! When `GDORK_HOME` is set (and non-empty) it replaces both platform-native
//! directories. Otherwise:
//!   - config: `dirs::config_dir()/gdork` (holds `config.toml`)
//!   - data:   `dirs::data_local_dir()/gdork` (holds `history.json`)

use std::path::PathBuf;

pub const HOME_ENV: &str = "GDORK_HOME";
const APP_DIR: &str = "gdork";

fn resolve_user_path(dirs_fallback: Option<PathBuf>) -> Option<PathBuf> {
    match std::env::var(HOME_ENV) {
        Ok(home) if !home.is_empty() => Some(PathBuf::from(home)),
        _ => dirs_fallback,
    }
}

/// Base directory for `config.toml`.
pub fn user_dir() -> Option<PathBuf> {
    resolve_user_path(dirs::config_dir().map(|d| d.join(APP_DIR)))
}

/// Base directory for the history file.
pub fn user_data_dir() -> Option<PathBuf> {
    resolve_user_path(dirs::data_local_dir().map(|d| d.join(APP_DIR)))
}

pub fn config_file() -> Option<PathBuf> {
    user_dir().map(|d| d.join("config.toml"))
}

pub fn default_history_file() -> Option<PathBuf> {
    user_data_dir().map(|d| d.join("history.json"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serial_test::serial;

    use super::*;

    fn set_home(val: &str) {
        // SAFETY: test-only env mutation; #[serial] prevents races.
        unsafe { std::env::set_var(HOME_ENV, val) };
    }

    fn clear_home() {
        unsafe { std::env::remove_var(HOME_ENV) };
    }

    #[test]
    #[serial]
    fn home_overrides_both_dirs() {
        set_home("/custom/gdork");
        let config = user_dir();
        let data = user_data_dir();
        clear_home();
        assert_eq!(config, Some(PathBuf::from("/custom/gdork")));
        assert_eq!(config, data);
    }

    #[test]
    #[serial]
    fn empty_home_falls_back_to_platform_dirs() {
        set_home("");
        let result = user_dir();
        clear_home();
        assert_eq!(result, dirs::config_dir().map(|d| d.join("gdork")));
    }

    #[test]
    #[serial]
    fn file_names_under_home() {
        set_home("/h");
        let config = config_file();
        let history = default_history_file();
        clear_home();
        assert_eq!(config, Some(PathBuf::from("/h/config.toml")));
        assert_eq!(history, Some(PathBuf::from("/h/history.json")));
    }
}
