use std::path::{Path, PathBuf};

use gdork::Error;
use gdork::config::Config;
use gdork::history::{HistoryEntry, HistoryStore};
use gdork::output::{EntryView, print_json};
use gdork::query::Field;

/// What every command needs: merged config plus the `--history-file` override.
pub struct Session {
    pub config: Config,
    pub history_file: Option<PathBuf>,
}

impl Session {
    /// Load the history store. A broken history file is reported but does
    /// not stop the command; it continues with an empty store.
    pub fn open_store(&self) -> anyhow::Result<HistoryStore> {
        let path = self
            .config
            .history_file(self.history_file.as_deref())
            .ok_or_else(|| anyhow::anyhow!("cannot determine history file path"))?;
        let (store, err) = HistoryStore::open(path);
        if let Some(e) = err {
            eprintln!("[gdork] warning: could not load history: {e}");
        }
        Ok(store)
    }
}

/// Map a 1-based id as shown by `history list` to a store index.
pub fn entry_index(store: &HistoryStore, id: usize) -> anyhow::Result<usize> {
    if id == 0 || id > store.len() {
        anyhow::bail!("history entry {id} not found");
    }
    Ok(id - 1)
}

fn print_entry_line(index: usize, entry: &HistoryEntry) {
    println!("{:>3}  {}", index + 1, entry.display_text);
}

pub fn cmd_history_list(session: &Session, json: bool) -> anyhow::Result<i32> {
    let store = session.open_store()?;

    if json {
        let views: Vec<EntryView<'_>> = store
            .entries()
            .iter()
            .enumerate()
            .map(|(i, e)| EntryView::new(i, e))
            .collect();
        print_json(&views);
        return Ok(0);
    }

    if store.is_empty() {
        eprintln!("[gdork] no history entries found");
        return Ok(0);
    }
    for (index, entry) in store.entries().iter().enumerate() {
        print_entry_line(index, entry);
    }
    Ok(0)
}

pub fn cmd_history_search(session: &Session, query: &str, json: bool) -> anyhow::Result<i32> {
    let store = session.open_store()?;
    let matches: Vec<(usize, &HistoryEntry)> = store.filter(query).collect();

    if json {
        let views: Vec<EntryView<'_>> = matches
            .iter()
            .map(|(i, e)| EntryView::new(*i, e))
            .collect();
        print_json(&views);
        return Ok(0);
    }

    if matches.is_empty() {
        eprintln!("[gdork] no matching history entries found");
        return Ok(0);
    }
    for (index, entry) in matches {
        print_entry_line(index, entry);
    }
    Ok(0)
}

pub fn cmd_history_show(session: &Session, id: usize, json: bool) -> anyhow::Result<i32> {
    let store = session.open_store()?;
    let index = entry_index(&store, id)?;
    let Some(entry) = store.get(index) else {
        anyhow::bail!("history entry {id} not found");
    };

    if json {
        print_json(&EntryView::new(index, entry));
        return Ok(0);
    }

    println!("ID: {id}");
    println!("Query: {}", entry.display_text);
    println!("\n--- Fields ---");
    for field in Field::ALL {
        let value = entry.fields.get(field);
        if !value.is_empty() {
            println!("{} ({}): {value}", field.label(), field.key());
        }
    }
    Ok(0)
}

pub fn cmd_history_delete(session: &Session, ids: &[usize]) -> anyhow::Result<i32> {
    let mut store = session.open_store()?;
    let mut indices = Vec::with_capacity(ids.len());
    for &id in ids {
        match entry_index(&store, id) {
            Ok(index) => indices.push(index),
            Err(e) => eprintln!("[gdork] warning: {e}"),
        }
    }

    let removed = store.remove_many(&indices)?;
    if removed == 0 {
        eprintln!("[gdork] nothing deleted");
    } else {
        eprintln!("[gdork] deleted {removed} item(s) from history");
    }
    Ok(0)
}

pub fn cmd_history_export(session: &Session, path: Option<&Path>) -> anyhow::Result<i32> {
    let store = session.open_store()?;
    let target = path.unwrap_or(session.config.export_file.as_path());

    match store.export_plain_text(target) {
        Ok(()) => {
            eprintln!(
                "[gdork] exported {} entries to {}",
                store.len(),
                target.display()
            );
            Ok(0)
        }
        Err(Error::EmptyHistory) => {
            eprintln!("[gdork] history is empty, nothing to export");
            Ok(1)
        }
        Err(e) => Err(e.into()),
    }
}
