use std::path::PathBuf;

/// Why a history file could not be read or written.
#[derive(Debug)]
pub enum PersistenceFailure {
    Read(std::io::Error),
    Write(std::io::Error),
    Malformed(serde_json::Error),
    Encode(serde_json::Error),
}

impl std::fmt::Display for PersistenceFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read(e) => write!(f, "read failed: {e}"),
            Self::Write(e) => write!(f, "write failed: {e}"),
            Self::Malformed(e) => write!(f, "malformed contents: {e}"),
            Self::Encode(e) => write!(f, "encoding failed: {e}"),
        }
    }
}

impl std::error::Error for PersistenceFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read(e) | Self::Write(e) => Some(e),
            Self::Malformed(e) | Self::Encode(e) => Some(e),
        }
    }
}

/// Errors surfaced by the query and history layers.
///
/// None of these are fatal: the caller decides how to present them.
/// [`Error::DuplicateQuery`] in particular is informational.
#[derive(Debug)]
pub enum Error {
    /// Every field was blank, so there is no query to save, search or export.
    EmptyQuery,
    /// A history entry with the same display text already exists.
    DuplicateQuery { display_text: String },
    /// Export was requested on an empty history.
    EmptyHistory,
    /// The durable history file (or an export target) could not be used.
    Persistence {
        path: PathBuf,
        source: PersistenceFailure,
    },
    /// The configured search engine URL could not be parsed.
    InvalidSearchUrl {
        base_url: String,
        source: url::ParseError,
    },
}

impl Error {
    pub(crate) fn persistence(path: impl Into<PathBuf>, source: PersistenceFailure) -> Self {
        Self::Persistence {
            path: path.into(),
            source,
        }
    }

    /// `true` for errors that only report that nothing changed.
    pub const fn is_informational(&self) -> bool {
        matches!(self, Self::DuplicateQuery { .. })
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyQuery => write!(f, "query is empty"),
            Self::DuplicateQuery { display_text } => {
                write!(f, "query is already in history: {display_text}")
            }
            Self::EmptyHistory => write!(f, "history is empty, nothing to export"),
            Self::Persistence { path, source } => {
                write!(f, "{}: {source}", path.display())
            }
            Self::InvalidSearchUrl { base_url, source } => {
                write!(f, "invalid search URL {base_url:?}: {source}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Persistence { source, .. } => Some(source),
            Self::InvalidSearchUrl { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_duplicate_is_informational() {
        let dup = Error::DuplicateQuery {
            display_text: "a".to_string(),
        };
        assert!(dup.is_informational());
        assert!(!Error::EmptyQuery.is_informational());
        assert!(!Error::EmptyHistory.is_informational());
    }

    #[test]
    fn persistence_display_names_path_and_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::persistence("/tmp/h.json", PersistenceFailure::Write(io));
        let msg = err.to_string();
        assert!(msg.contains("/tmp/h.json"), "got: {msg}");
        assert!(msg.contains("write failed"), "got: {msg}");
        assert!(std::error::Error::source(&err).is_some());
    }
}
