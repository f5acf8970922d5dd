//! Translation table loaded from `translations.json`.
//!
//! The document is an object keyed by language code, each value an arbitrarily nested object of string leaves:
//! ```json
//! {
//!   "fr": { "projects": { "viewCode": "Code", "viewDemo": "Démo" } },
//!   "en": { "projects": { "viewCode": "Code", "viewDemo": "Demo" } }
//! }
//! ```
//! Leaves are addressed with dot-separated key paths, e.g. `projects.viewDemo`.
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::errors::FetchError;

/// Language used when no preference has been stored yet.
pub const DEFAULT_LANGUAGE: &str = "fr";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TranslationNode {
    Text(String),
    Group(FxHashMap<String, TranslationNode>),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct TranslationTable(FxHashMap<String, TranslationNode>);

impl TranslationTable {
    pub fn from_json(url: &str, bytes: &[u8]) -> Result<Self, FetchError> {
        serde_json::from_slice(bytes).map_err(|source| FetchError::InvalidJson {
            url: url.to_string(),
            source,
        })
    }

    pub fn supports(&self, code: &str) -> bool {
        self.0.contains_key(code)
    }

    /// Language codes present in the table, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.0.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    /// Resolves `key_path` in the sub-table of `code`.
    ///
    /// Returns `None` when the language is unknown, when any segment is missing, when the path stops on a group,
    /// or when the leaf is an empty string.
    pub fn resolve(&self, code: &str, key_path: &str) -> Option<&str> {
        let mut node = self.0.get(code)?;

        for segment in key_path.split('.') {
            match node {
                TranslationNode::Group(children) => node = children.get(segment)?,
                TranslationNode::Text(_) => return None,
            }
        }

        match node {
            TranslationNode::Text(text) if !text.is_empty() => Some(text),
            _ => None,
        }
    }
}
