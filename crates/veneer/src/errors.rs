use indexmap::IndexMap;
use serde::Serialize;

/// Per-node validation error collection.
///
/// Maps a field key to every message recorded against it. Consolidation from
/// child nodes concatenates message lists per key, never overwrites, so two
/// children independently rejecting the same field both stay visible.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Errors {
    entries: IndexMap<String, Vec<String>>,
}

impl Errors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field key.
    pub fn add(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.entries
            .entry(key.into())
            .or_default()
            .push(message.into());
    }

    /// Merge another collection into this one, concatenating per key.
    pub fn merge(&mut self, other: &Errors) {
        for (key, messages) in &other.entries {
            self.entries
                .entry(key.clone())
                .or_default()
                .extend(messages.iter().cloned());
        }
    }

    /// Messages recorded against `key`, empty when the field is clean.
    pub fn get(&self, key: &str) -> &[String] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of field keys carrying at least one message.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Render every entry as `"{key} {message}"`, in insertion order.
    pub fn full_messages(&self) -> Vec<String> {
        self.entries
            .iter()
            .flat_map(|(key, messages)| {
                messages.iter().map(move |message| format!("{key} {message}"))
            })
            .collect()
    }
}

/// Rewrite a field key with a mounting suffix, unless it already carries it.
pub(crate) fn suffixed_key(key: &str, suffix: Option<&str>) -> String {
    match suffix {
        Some(suffix) if !key.ends_with(&format!("_{suffix}")) => format!("{key}_{suffix}"),
        _ => key.to_string(),
    }
}
