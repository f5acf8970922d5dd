//! Per-page session: the active language and the loaded translation table.
use crate::{
    errors::LanguageError,
    i18n::{DEFAULT_LANGUAGE, TranslationTable},
    preferences::{LANGUAGE_PREFERENCE_KEY, PreferenceStore},
};

/// Short strings used by dynamically rendered content, resolved for one language.
///
/// Any label missing from the translation table falls back to its French default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub view_code: String,
    pub view_demo: String,
    pub no_projects: String,
    pub projects_error: String,
    pub read_article: String,
    pub no_articles: String,
    pub articles_error: String,
    pub message_sent: String,
}

impl Labels {
    const KEYS: [(&'static str, &'static str); 8] = [
        ("projects.viewCode", "Code"),
        ("projects.viewDemo", "Démo"),
        ("projects.noProjects", "Aucun projet disponible pour le moment."),
        (
            "projects.loadError",
            "Erreur lors du chargement des projets. Vérifiez que le fichier projects.json existe et est valide.",
        ),
        ("articles.readArticle", "Lire l'article"),
        ("articles.noArticles", "Aucun article disponible pour le moment."),
        (
            "articles.loadError",
            "Erreur lors du chargement des articles. Vérifiez que le fichier articles.json existe et est valide.",
        ),
        ("contact.sent", "Message envoyé !"),
    ];

    /// French default for one of the label keys.
    pub fn fallback(key_path: &str) -> Option<&'static str> {
        Self::KEYS
            .iter()
            .find(|(key, _)| *key == key_path)
            .map(|(_, fallback)| *fallback)
    }

    /// Resolves every label for `code`, falling back per label.
    pub fn resolve(table: Option<&TranslationTable>, code: &str) -> Self {
        let [
            view_code,
            view_demo,
            no_projects,
            projects_error,
            read_article,
            no_articles,
            articles_error,
            message_sent,
        ] = Self::KEYS.map(|(key, fallback)| {
            table
                .and_then(|table| table.resolve(code, key))
                .unwrap_or(fallback)
                .to_string()
        });

        Self {
            view_code,
            view_demo,
            no_projects,
            projects_error,
            read_article,
            no_articles,
            articles_error,
            message_sent,
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self::resolve(None, DEFAULT_LANGUAGE)
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    language: String,
    table: Option<TranslationTable>,
}

impl Session {
    /// Starts a session from the persisted preference, or [`DEFAULT_LANGUAGE`] if none was stored.
    ///
    /// The stored code isn't checked here, there is no table yet. See [`Session::fall_back`].
    pub fn restore(store: &dyn PreferenceStore) -> Self {
        let language = store
            .get(LANGUAGE_PREFERENCE_KEY)
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

        Self {
            language,
            table: None,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn table(&self) -> Option<&TranslationTable> {
        self.table.as_ref()
    }

    pub fn set_table(&mut self, table: TranslationTable) {
        self.table = Some(table);
    }

    pub fn supports(&self, code: &str) -> bool {
        self.table.as_ref().is_some_and(|table| table.supports(code))
    }

    /// Goes back to [`DEFAULT_LANGUAGE`] if the active language can't be displayed.
    ///
    /// Returns the language that was dropped, if any.
    pub fn fall_back(&mut self) -> Option<String> {
        if self.language == DEFAULT_LANGUAGE || self.supports(&self.language) {
            return None;
        }

        Some(std::mem::replace(&mut self.language, DEFAULT_LANGUAGE.to_string()))
    }

    /// Labels for the active language.
    pub fn labels(&self) -> Labels {
        Labels::resolve(self.table.as_ref(), &self.language)
    }

    pub fn translate(&self, key_path: &str) -> Option<&str> {
        self.table.as_ref()?.resolve(&self.language, key_path)
    }

    /// Localized text for `key_path`, or its built-in default, or the key itself.
    pub fn message(&self, key_path: &str) -> String {
        self.translate(key_path)
            .or_else(|| Labels::fallback(key_path))
            .unwrap_or(key_path)
            .to_string()
    }

    /// Makes `code` the active language. Unknown codes (or a missing table) leave the active language untouched.
    ///
    /// Persisting the choice is up to the caller.
    pub fn switch(&mut self, code: &str) -> Result<(), LanguageError> {
        if !self.supports(code) {
            return Err(LanguageError::Unsupported {
                code: code.to_string(),
            });
        }

        self.language = code.to_string();
        Ok(())
    }
}
