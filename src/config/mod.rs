use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::history::DEFAULT_EXPORT_FILE;
use crate::paths;

pub const DEFAULT_SEARCH_URL: &str = "https://www.google.com/search";

/// Runtime configuration merged from the optional `config.toml` and defaults.
///
/// ```toml
/// [history]
/// path = "/some/where/history.json"
/// export_file = "dork_history.txt"
///
/// [search]
/// base_url = "https://www.google.com/search"
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub history_path: Option<PathBuf>,
    pub export_file: PathBuf,
    pub search_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_path: None,
            export_file: PathBuf::from(DEFAULT_EXPORT_FILE),
            search_base_url: DEFAULT_SEARCH_URL.to_string(),
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    history: Option<HistorySection>,
    search: Option<SearchSection>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct HistorySection {
    path: Option<PathBuf>,
    export_file: Option<PathBuf>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SearchSection {
    base_url: Option<String>,
}

/// Read and parse a config file. `Ok(None)` when it does not exist.
fn read_config_file(path: &Path) -> anyhow::Result<Option<ConfigFile>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!("failed to read config file: {}", path.display())));
        }
    };
    let parsed = toml::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;
    Ok(Some(parsed))
}

impl Config {
    /// Load from `{user_dir}/config.toml`, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(paths::config_file().as_deref())
    }

    /// Load from an explicit path. A missing, unreadable or invalid file
    /// yields the defaults; the latter two are logged.
    pub fn load_from(path: Option<&Path>) -> Self {
        let mut config = Self::default();
        let Some(path) = path else {
            return config;
        };
        match read_config_file(path) {
            Ok(Some(file)) => config.apply(file),
            Ok(None) => tracing::debug!("no config file at {}", path.display()),
            Err(e) => tracing::warn!("ignoring config: {e:#}"),
        }
        config
    }

    fn apply(&mut self, file: ConfigFile) {
        if let Some(history) = file.history {
            if history.path.is_some() {
                self.history_path = history.path;
            }
            if let Some(export_file) = history.export_file {
                self.export_file = export_file;
            }
        }
        if let Some(base_url) = file.search.and_then(|s| s.base_url) {
            self.search_base_url = base_url;
        }
    }

    /// History file to use. Priority: explicit override (flag or
    /// `GDORK_HISTORY_PATH`) → `[history] path` → `{user_data_dir}/history.json`.
    pub fn history_file(&self, explicit: Option<&Path>) -> Option<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.history_path.clone())
            .or_else(paths::default_history_file)
    }
}

#[cfg(test)]
mod tests;
