use crate::Value;

use indexmap::IndexMap;
use serde::Serialize;

/// The flat map exchanged at the engine boundary.
///
/// Keys are mapping full names; insertion order is preserved so reads render
/// fields in declaration order and merges stay deterministic.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Params {
    entries: IndexMap<String, Value>,
}

/// Build a [`Params`] map from `key => value` pairs.
#[macro_export]
macro_rules! params {
    () => { $crate::Params::new() };
    ( $( $key:expr => $value:expr ),+ $(,)? ) => {{
        let mut params = $crate::Params::new();
        $( params.insert($key, $value); )+
        params
    }};
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Remove a key, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Merge `other` into `self`; `other` wins on key collision.
    pub fn merge(&mut self, other: Self) {
        for (key, value) in other.entries {
            self.entries.insert(key, value);
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Value)> for Params {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Params {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Extend<(String, Value)> for Params {
    fn extend<T: IntoIterator<Item = (String, Value)>>(&mut self, iter: T) {
        self.entries.extend(iter);
    }
}
