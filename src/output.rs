use serde::Serialize;

use crate::history::HistoryEntry;
use crate::query::QuerySpec;

/// JSON shape for one listed entry. `id` is the 1-based position shown to users.
#[derive(Serialize)]
pub struct EntryView<'a> {
    pub id: usize,
    pub display_text: &'a str,
    pub query_parts: &'a QuerySpec,
}

impl<'a> EntryView<'a> {
    pub fn new(index: usize, entry: &'a HistoryEntry) -> Self {
        Self {
            id: index + 1,
            display_text: entry.display_text.as_str(),
            query_parts: &entry.fields,
        }
    }
}

/// Print a Serialize value as pretty JSON, logging errors to stderr.
pub fn print_json(value: &(impl Serialize + ?Sized)) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("[gdork] JSON serialization error: {e}"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::query::Field;

    #[test]
    fn entry_view_uses_one_based_id() {
        let entry = HistoryEntry::from_spec(QuerySpec::new().with(Field::Site, "a.com"));
        let json = serde_json::to_value(EntryView::new(0, &entry)).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["display_text"], "site:a.com");
        assert_eq!(json["query_parts"]["site"], "a.com");
    }
}
