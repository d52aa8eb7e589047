//! Binding values, registration entries and the output parameter map

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Character that introduces a named placeholder
pub const PLACEHOLDER_MARKER: char = ':';

/// Suffix that marks a label as array-expanding
pub const ARRAY_MARKER: &str = "[]";

/// Value bound to a label: a single scalar or an ordered list of scalars
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BindValue {
    Scalar(String),
    List(Vec<String>),
}

impl BindValue {
    pub fn is_list(&self) -> bool {
        matches!(self, BindValue::List(_))
    }
}

impl From<&str> for BindValue {
    fn from(value: &str) -> Self {
        BindValue::Scalar(value.to_string())
    }
}

impl From<String> for BindValue {
    fn from(value: String) -> Self {
        BindValue::Scalar(value)
    }
}

impl From<Vec<String>> for BindValue {
    fn from(values: Vec<String>) -> Self {
        BindValue::List(values)
    }
}

impl From<Vec<&str>> for BindValue {
    fn from(values: Vec<&str>) -> Self {
        BindValue::List(values.into_iter().map(str::to_string).collect())
    }
}

/// A registered label and the value it binds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub label: String,
    pub value: BindValue,
}

/// Whether a label uses the array-expanding form (`:name[]`)
pub fn is_array_label(label: &str) -> bool {
    label.ends_with(ARRAY_MARKER)
}

/// Strip the leading marker and, for array labels, the trailing `[]`.
///
/// `:users[]` becomes `users`, `:id` becomes `id`. Labels without a leading
/// marker are returned minus their first character all the same, so callers
/// are expected to register well-formed labels.
pub fn label_prefix(label: &str) -> &str {
    let body = match label.chars().next() {
        Some(first) => &label[first.len_utf8()..],
        None => label,
    };

    if is_array_label(label) {
        body.strip_suffix(ARRAY_MARKER).unwrap_or("")
    } else {
        body
    }
}

/// Insertion-ordered map from parameter name (without marker) to value.
///
/// Inserting an existing name overwrites its value and keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindParams {
    entries: Vec<(String, String)>,
}

impl BindParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Merge another map into this one; later values win on collision
    pub fn extend(&mut self, other: BindParams) {
        for (name, value) in other.entries {
            self.insert(name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for BindParams {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
