//! Query assembly: turn a set of labeled field values into one dork query string.
//!
//! Commas inside a field mean OR, multi-word terms are quoted, operator fields
//! are prefixed with their operator, and exclusions become `-term` tokens.
//! Everything here is pure and cheap enough to call on every keystroke.

use std::borrow::Cow;
use std::fmt;

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Filetype choices offered as presets. Any other value is still accepted.
pub const FILETYPE_PRESETS: &[&str] = &[
    "pdf", "docx", "xlsx", "pptx", "txt", "log", "php", "asp", "sql", "env", "conf", "config",
    "bak", "ini", "pem", "crt",
];

/// One recognised input field. Declaration order is the assembly order for
/// operator fields and the serialisation order for stored specs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Keywords,
    ExcludeKeywords,
    Site,
    InTitle,
    InUrl,
    InText,
    Related,
    Cache,
    Filetype,
}

impl Field {
    pub const ALL: [Self; 9] = [
        Self::Keywords,
        Self::ExcludeKeywords,
        Self::Site,
        Self::InTitle,
        Self::InUrl,
        Self::InText,
        Self::Related,
        Self::Cache,
        Self::Filetype,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Stable identifier used in the history file.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Keywords => "keywords",
            Self::ExcludeKeywords => "exclude_keywords",
            Self::Site => "site",
            Self::InTitle => "in_title",
            Self::InUrl => "in_url",
            Self::InText => "in_text",
            Self::Related => "related",
            Self::Cache => "cache",
            Self::Filetype => "filetype",
        }
    }

    /// Search operator for this field: the key with underscores removed.
    /// Keywords and exclusions have no operator and return `""`.
    pub const fn operator(self) -> &'static str {
        match self {
            Self::Keywords | Self::ExcludeKeywords => "",
            Self::Site => "site",
            Self::InTitle => "intitle",
            Self::InUrl => "inurl",
            Self::InText => "intext",
            Self::Related => "related",
            Self::Cache => "cache",
            Self::Filetype => "filetype",
        }
    }

    pub const fn is_operator(self) -> bool {
        !matches!(self, Self::Keywords | Self::ExcludeKeywords)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Keywords => "Keywords",
            Self::ExcludeKeywords => "Exclude Keywords",
            Self::Site => "Site",
            Self::InTitle => "In Title",
            Self::InUrl => "In URL",
            Self::InText => "In Text",
            Self::Related => "Related",
            Self::Cache => "Cache",
            Self::Filetype => "File Type",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Keywords => "Core search terms; use a comma for OR.",
            Self::ExcludeKeywords => "Terms that must not appear in results.",
            Self::Site => "Search within a specific website.",
            Self::InTitle => "Search for terms in the page title.",
            Self::InUrl => "Search for terms in the page URL.",
            Self::InText => "Search for terms in the body of the page.",
            Self::Related => "Find sites related to a given domain.",
            Self::Cache => "Find the cached version of a page.",
            Self::Filetype => "Restrict results to a file extension.",
        }
    }

    pub const fn example(self) -> &'static str {
        match self {
            Self::Keywords => "confidential data, internal report",
            Self::ExcludeKeywords => "public, template, sample",
            Self::Site | Self::Cache => "example.com",
            Self::InTitle => "index of, login",
            Self::InUrl => "admin.php, login.jsp",
            Self::InText => "password, secret",
            Self::Related => "google.com",
            Self::Filetype => "pdf",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The complete user-entered state: one value per [`Field`], empty when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySpec {
    values: [String; Field::COUNT],
}

impl QuerySpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    #[must_use]
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// `true` when every field is empty or whitespace.
    pub fn is_blank(&self) -> bool {
        self.values.iter().all(|v| v.trim().is_empty())
    }

    /// Values in declared field order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL.into_iter().map(|f| (f, self.get(f)))
    }

    /// Replace the given fields, leaving the rest untouched. An empty value
    /// clears its field.
    pub fn overlay<'a>(&mut self, edits: impl IntoIterator<Item = (Field, &'a str)>) {
        for (field, value) in edits {
            self.set(field, value);
        }
    }
}

impl Serialize for QuerySpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Field::COUNT))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.key(), value)?;
        }
        map.end()
    }
}

struct QuerySpecVisitor;

impl<'de> Visitor<'de> for QuerySpecVisitor {
    type Value = QuerySpec;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of field keys to string values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<QuerySpec, A::Error> {
        let mut spec = QuerySpec::default();
        while let Some(key) = access.next_key::<String>()? {
            match Field::from_key(&key) {
                Some(field) => {
                    let value: Option<String> = access.next_value()?;
                    spec.set(field, value.unwrap_or_default());
                }
                None => {
                    access.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(spec)
    }
}

impl<'de> Deserialize<'de> for QuerySpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(QuerySpecVisitor)
    }
}

/// Comma-separated segments, trimmed, with empty ones dropped.
fn segments(text: &str) -> impl Iterator<Item = &str> {
    text.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn is_fully_quoted(segment: &str) -> bool {
    segment.len() >= 2 && segment.starts_with('"') && segment.ends_with('"')
}

fn quote_if_spaced(segment: &str) -> Cow<'_, str> {
    if segment.contains(' ') && !is_fully_quoted(segment) {
        Cow::Owned(format!("\"{segment}\""))
    } else {
        Cow::Borrowed(segment)
    }
}

/// Format one field value.
///
/// Segments containing a space are quoted, each segment is prefixed with
/// `operator:` when `operator` is non-empty, and two or more segments are
/// joined as `(a OR b)`. Blank input yields an empty string.
pub fn format_term(text: &str, operator: &str) -> String {
    let parts: Vec<String> = segments(text)
        .map(|segment| {
            let segment = quote_if_spaced(segment);
            if operator.is_empty() {
                segment.into_owned()
            } else {
                format!("{operator}:{segment}")
            }
        })
        .collect();

    match parts.as_slice() {
        [] => String::new(),
        [single] => single.clone(),
        _ => format!("({})", parts.join(" OR ")),
    }
}

/// One `-term` token per exclusion segment; never OR-grouped.
fn format_exclusions(text: &str) -> impl Iterator<Item = String> + '_ {
    segments(text).map(|segment| format!("-{}", quote_if_spaced(segment)))
}

/// Assemble the full query: keywords, then operator fields in declared order,
/// then exclusions. An all-blank spec yields `""`.
pub fn assemble(spec: &QuerySpec) -> String {
    let mut parts = Vec::with_capacity(Field::COUNT);

    let keywords = format_term(spec.get(Field::Keywords), "");
    if !keywords.is_empty() {
        parts.push(keywords);
    }

    for field in Field::ALL.into_iter().filter(|f| f.is_operator()) {
        let term = format_term(spec.get(field), field.operator());
        if !term.is_empty() {
            parts.push(term);
        }
    }

    parts.extend(format_exclusions(spec.get(Field::ExcludeKeywords)));
    parts.join(" ")
}
