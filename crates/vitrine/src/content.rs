//! Entries displayed by the portfolio, as found in `projects.json` and `articles.json`.
//!
//! Both files contain a top-level JSON array. Entries are read-only: they are rendered, never mutated.
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::errors::FetchError;

/// A project shown as a card in the project gallery.
///
/// ## Example
/// ```json
/// {
///   "title": "Wallet tracker",
///   "description": "Follows stake pools.",
///   "image": "assets/images/wallet.png",
///   "technologies": ["Rust", "Cardano"],
///   "github": "https://github.com/example/wallet",
///   "cardano": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectEntry {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub demo: Option<String>,
    #[serde(default)]
    pub cardano: bool,
}

/// An article linked from the article list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ArticleEntry {
    pub title: String,
    pub description: String,
    pub link: String,
}

/// Parses a JSON array of entries. `url` is only used for error reporting.
pub fn parse_collection<T: DeserializeOwned>(url: &str, bytes: &[u8]) -> Result<Vec<T>, FetchError> {
    serde_json::from_slice(bytes).map_err(|source| FetchError::InvalidJson {
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_optional_fields_default() {
        let projects: Vec<ProjectEntry> = parse_collection(
            "projects.json",
            br#"[{"title":"X","description":"","technologies":["Go"],"github":"https://x"}]"#,
        )
        .unwrap();

        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].image, None);
        assert_eq!(projects[0].demo, None);
        assert!(!projects[0].cardano);
        assert_eq!(projects[0].technologies, vec!["Go".to_string()]);
    }

    #[test]
    fn test_empty_collection_is_valid() {
        let articles: Vec<ArticleEntry> = parse_collection("articles.json", b"[]").unwrap();
        assert!(articles.is_empty());
    }

    #[test]
    fn test_non_array_is_rejected() {
        let result: Result<Vec<ArticleEntry>, _> =
            parse_collection("articles.json", br#"{"title":"nope"}"#);

        assert!(matches!(result, Err(FetchError::InvalidJson { url, .. }) if url == "articles.json"));
    }
}
