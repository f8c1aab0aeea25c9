use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A translation table for control strings.
///
/// Keys are the english source strings, e.g. `"Seek To LIVE edge"`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Language {
    strings: HashMap<String, String>,
}

impl Language {
    /// Creates a new empty `Language`. Every lookup falls back to the key.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: ToString,
        V: ToString,
    {
        self.strings.insert(key.to_string(), value.to_string());
    }

    /// Returns the translation of `key`, or `key` itself if there is none.
    pub fn localize(&self, key: &str) -> String {
        match self.strings.get(key) {
            Some(value) => value.clone(),
            None => key.to_owned(),
        }
    }
}
