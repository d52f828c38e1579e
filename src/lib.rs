pub mod config;
pub mod error;
pub mod history;
pub mod logging;
pub mod output;
pub mod paths;
pub mod query;
pub mod search;

pub use error::{Error, Result};
pub use history::{HistoryEntry, HistoryStore};
pub use query::{Field, QuerySpec, assemble, format_term};
