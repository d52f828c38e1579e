use clap::Args;

use gdork::Error;
use gdork::query::{FILETYPE_PRESETS, Field, QuerySpec, assemble};
use gdork::search;

use crate::history_cmd::{Session, entry_index};

/// Query fields shared by `build`, `open` and `save`. Commas mean OR.
#[derive(Args, Debug, Default, Clone)]
pub struct FieldArgs {
    /// Core search terms (e.g. "confidential data, internal report")
    #[arg(short, long, value_name = "TERMS")]
    pub keywords: Option<String>,
    /// Terms to exclude (e.g. "public, template")
    #[arg(short = 'x', long = "exclude", value_name = "TERMS")]
    pub exclude_keywords: Option<String>,
    /// site: restrict to a website
    #[arg(long, value_name = "DOMAINS")]
    pub site: Option<String>,
    /// intitle: terms in the page title
    #[arg(long, value_name = "TERMS")]
    pub in_title: Option<String>,
    /// inurl: terms in the page URL
    #[arg(long, value_name = "TERMS")]
    pub in_url: Option<String>,
    /// intext: terms in the page body
    #[arg(long, value_name = "TERMS")]
    pub in_text: Option<String>,
    /// related: sites related to a domain
    #[arg(long, value_name = "DOMAIN")]
    pub related: Option<String>,
    /// cache: cached version of a page
    #[arg(long, value_name = "URL")]
    pub cache: Option<String>,
    /// filetype: file extension (see `gdork fields` for presets)
    #[arg(long, value_name = "EXT")]
    pub filetype: Option<String>,
    /// Start from history entry N and apply the flags above on top
    #[arg(long, value_name = "N")]
    pub from: Option<usize>,
}

impl FieldArgs {
    fn value(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::Keywords => &self.keywords,
            Field::ExcludeKeywords => &self.exclude_keywords,
            Field::Site => &self.site,
            Field::InTitle => &self.in_title,
            Field::InUrl => &self.in_url,
            Field::InText => &self.in_text,
            Field::Related => &self.related,
            Field::Cache => &self.cache,
            Field::Filetype => &self.filetype,
        };
        value.as_deref()
    }

    /// Every field given on the command line, trimmed. A flag passed as
    /// `""` is kept so it can clear a value loaded with `--from`.
    fn edits(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL
            .into_iter()
            .filter_map(|field| self.value(field).map(|v| (field, v.trim())))
    }
}

/// The spec for this invocation: the `--from` history entry (if any) with
/// the given flags overlaid.
fn resolve_spec(fields: &FieldArgs, session: &Session) -> anyhow::Result<QuerySpec> {
    let mut spec = match fields.from {
        Some(id) => {
            let store = session.open_store()?;
            let index = entry_index(&store, id)?;
            let loaded = store
                .get(index)
                .map(|e| e.fields.clone())
                .unwrap_or_default();
            if loaded.is_blank() {
                eprintln!("[gdork] warning: history entry {id} has no stored fields");
            }
            loaded
        }
        None => QuerySpec::new(),
    };
    spec.overlay(fields.edits());

    if let Some(filetype) = fields.filetype.as_deref().map(str::trim)
        && !filetype.is_empty()
        && !FILETYPE_PRESETS.contains(&filetype)
    {
        tracing::debug!("filetype {filetype:?} is not a preset");
    }
    Ok(spec)
}

pub fn cmd_build(fields: &FieldArgs, url: bool, session: &Session) -> anyhow::Result<i32> {
    let spec = resolve_spec(fields, session)?;
    let query = assemble(&spec);
    if query.is_empty() {
        eprintln!("[gdork] query is empty, nothing to build");
        return Ok(1);
    }

    if url {
        println!(
            "{}",
            search::search_url(&session.config.search_base_url, &query)?
        );
    } else {
        println!("{query}");
    }
    Ok(0)
}

pub fn cmd_open(fields: &FieldArgs, session: &Session) -> anyhow::Result<i32> {
    let spec = resolve_spec(fields, session)?;
    let query = assemble(&spec);
    let url = match search::search_url(&session.config.search_base_url, &query) {
        Ok(url) => url,
        Err(Error::EmptyQuery) => {
            eprintln!("[gdork] query is empty, nothing to search");
            return Ok(1);
        }
        Err(e) => return Err(e.into()),
    };
    search::open_in_browser(&url)?;
    eprintln!("[gdork] searching for: {query}");
    Ok(0)
}

pub fn cmd_save(fields: &FieldArgs, session: &Session) -> anyhow::Result<i32> {
    let spec = resolve_spec(fields, session)?;
    let mut store = session.open_store()?;

    match store.add(spec) {
        Ok(entry) => {
            println!("{}", entry.display_text);
            eprintln!("[gdork] query saved to history");
            Ok(0)
        }
        Err(e) if e.is_informational() => {
            eprintln!("[gdork] {e}");
            Ok(0)
        }
        Err(Error::EmptyQuery) => {
            eprintln!("[gdork] cannot save an empty query");
            Ok(1)
        }
        Err(e) => Err(e.into()),
    }
}

pub fn cmd_fields() -> i32 {
    for field in Field::ALL {
        let operator = if field.is_operator() {
            format!("{}:", field.operator())
        } else if field == Field::ExcludeKeywords {
            "-".to_string()
        } else {
            String::new()
        };
        println!(
            "{:<18} {:<10} {}  (e.g. {})",
            field.key(),
            operator,
            field.description(),
            field.example()
        );
    }
    println!("\nfiletype presets: {}", FILETYPE_PRESETS.join(", "));
    0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn spec_of(args: &FieldArgs) -> QuerySpec {
        let mut spec = QuerySpec::new();
        spec.overlay(args.edits());
        spec
    }

    #[test]
    fn edits_trim_and_map_every_flag() {
        let args = FieldArgs {
            keywords: Some("  admin ".to_string()),
            exclude_keywords: Some("public".to_string()),
            in_title: Some("index of".to_string()),
            filetype: Some("pdf".to_string()),
            ..FieldArgs::default()
        };
        let spec = spec_of(&args);
        assert_eq!(spec.get(Field::Keywords), "admin");
        assert_eq!(spec.get(Field::ExcludeKeywords), "public");
        assert_eq!(spec.get(Field::InTitle), "index of");
        assert_eq!(spec.get(Field::Filetype), "pdf");
        assert_eq!(spec.get(Field::Site), "");
    }

    #[test]
    fn no_flags_is_blank() {
        assert!(spec_of(&FieldArgs::default()).is_blank());
    }

    #[test]
    fn edits_keep_empty_flags_and_skip_absent_ones() {
        let args = FieldArgs {
            site: Some(String::new()),
            filetype: Some(" pdf ".to_string()),
            ..FieldArgs::default()
        };
        let edits: Vec<(Field, &str)> = args.edits().collect();
        assert_eq!(edits, [(Field::Site, ""), (Field::Filetype, "pdf")]);
    }
}
