//! Turns the JSON collections into markup and keeps the view in the active language.
//!
//! The [`Renderer`] owns the [`Session`] and the [`View`] it writes into. All of its operations can run concurrently
//! (e.g. both collections are loaded with `tokio::join!`), none of them returns an error past the renderer: failures
//! end up as inline messages in the view and as log entries.
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, error, info, warn};
use maud::{Markup, html};
use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;

use crate::{
    content::{ArticleEntry, ProjectEntry, parse_collection},
    errors::{FetchError, LanguageError},
    fetch::Fetcher,
    i18n::TranslationTable,
    preferences::{LANGUAGE_PREFERENCE_KEY, PreferenceStore},
    session::{Labels, Session},
    view::{Slot, View},
};

const IMAGE_FALLBACK_SCRIPT: &str =
    "this.style.display='none'; this.nextElementSibling.style.display='flex';";

/// A project card. Optional fields that are missing simply don't produce their element.
///
/// The placeholder block is always rendered right after the image: visible when there is no image, hidden otherwise
/// and revealed by the image's `onerror` hook if it fails to load.
pub fn build_project_card(project: &ProjectEntry, labels: &Labels) -> Markup {
    let placeholder_display = if project.image.is_some() {
        "display: none;"
    } else {
        "display: flex;"
    };

    html! {
        div.project-card {
            @if let Some(image) = &project.image {
                img.project-image src=(image) alt=(project.title) onerror=(IMAGE_FALLBACK_SCRIPT);
            }
            div.project-image-placeholder style=(placeholder_display) {
                i.fas.fa-code {}
            }
            div.project-content {
                h3.project-title {
                    (project.title)
                    @if project.cardano {
                        " "
                        span.cardano-badge { i.fas.fa-coins {} " Cardano" }
                    }
                }
                p.project-description { (project.description) }
                div.project-tech {
                    @for technology in &project.technologies {
                        span.tech-tag { (technology) }
                    }
                }
                div.project-links {
                    @if let Some(github) = &project.github {
                        a.project-link href=(github) target="_blank" rel="noopener" {
                            i.fab.fa-github {} " " (labels.view_code)
                        }
                    }
                    @if let Some(demo) = &project.demo {
                        a.project-link.secondary href=(demo) target="_blank" rel="noopener" {
                            i.fas.fa-external-link-alt {} " " (labels.view_demo)
                        }
                    }
                }
            }
        }
    }
}

pub fn build_article_item(article: &ArticleEntry, labels: &Labels) -> Markup {
    html! {
        div.article-item {
            h3.article-title {
                a href=(article.link) target="_blank" rel="noopener" { (article.title) }
            }
            p.article-description { (article.description) }
            a.article-link href=(article.link) target="_blank" rel="noopener" {
                (labels.read_article) " " i.fas.fa-arrow-right {}
            }
        }
    }
}

/// Where a collection comes from, where it goes, and which messages describe its empty and failed states.
#[derive(Debug, Clone, Copy)]
pub struct Collection<'a> {
    pub url: &'a str,
    pub slot: Slot,
    pub empty_key: &'a str,
    pub error_key: &'a str,
}

impl<'a> Collection<'a> {
    pub fn projects(url: &'a str) -> Self {
        Self {
            url,
            slot: Slot::Projects,
            empty_key: "projects.noProjects",
            error_key: "projects.loadError",
        }
    }

    pub fn articles(url: &'a str) -> Self {
        Self {
            url,
            slot: Slot::Articles,
            empty_key: "articles.noArticles",
            error_key: "articles.loadError",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionOutcome {
    /// This many items were rendered.
    Rendered(usize),
    Empty,
    Failed,
    /// A newer load for the same slot started while this one was in flight, its result was dropped.
    Superseded,
    MissingTarget,
}

/// URLs of the three JSON resources, relative to whatever the fetcher serves.
#[derive(Debug, Clone)]
pub struct SiteSources {
    pub projects: String,
    pub articles: String,
    pub translations: String,
}

impl Default for SiteSources {
    fn default() -> Self {
        Self {
            projects: "projects.json".into(),
            articles: "articles.json".into(),
            translations: "translations.json".into(),
        }
    }
}

/// Per-slot request counters, so that only the latest load of a slot gets to render.
#[derive(Debug, Default)]
struct Generations(Mutex<FxHashMap<Slot, u64>>);

impl Generations {
    fn begin(&self, slot: Slot) -> u64 {
        let mut generations = lock(&self.0);
        let generation = generations.entry(slot).or_default();
        *generation += 1;
        *generation
    }

    fn is_current(&self, slot: Slot, generation: u64) -> bool {
        lock(&self.0).get(&slot) == Some(&generation)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Sets the document language and the uppercase code shown by the language indicator.
fn show_language<V: View>(view: &mut V, code: &str) {
    view.set_language(code);

    if view.has_slot(Slot::LanguageIndicator) {
        if let Err(err) = view.fill(Slot::LanguageIndicator, html! { (code.to_uppercase()) }) {
            error!(target: "render", "{}", err);
        }
    }
}

pub struct Renderer<F, V> {
    fetcher: F,
    sources: SiteSources,
    session: Mutex<Session>,
    store: Mutex<Box<dyn PreferenceStore>>,
    view: Mutex<V>,
    generations: Generations,
}

impl<F: Fetcher, V: View> Renderer<F, V> {
    /// The session starts in the language saved in `store`, which also receives every later switch.
    pub fn new(fetcher: F, view: V, store: impl PreferenceStore + 'static) -> Self {
        Self {
            fetcher,
            sources: SiteSources::default(),
            session: Mutex::new(Session::restore(&store)),
            store: Mutex::new(Box::new(store)),
            view: Mutex::new(view),
            generations: Generations::default(),
        }
    }

    pub fn with_sources(mut self, sources: SiteSources) -> Self {
        self.sources = sources;
        self
    }

    pub fn language(&self) -> String {
        lock(&self.session).language().to_string()
    }

    pub fn labels(&self) -> Labels {
        lock(&self.session).labels()
    }

    /// Languages of the loaded translation table, sorted. Empty until [`Renderer::start`] loaded one.
    pub fn languages(&self) -> Vec<String> {
        lock(&self.session)
            .table()
            .map(|table| table.languages().into_iter().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Runs `f` against the view. Useful to inspect it between operations.
    pub fn with_view<R>(&self, f: impl FnOnce(&V) -> R) -> R {
        f(&lock(&self.view))
    }

    pub fn into_parts(self) -> (V, Session) {
        (
            self.view.into_inner().unwrap_or_else(PoisonError::into_inner),
            self.session
                .into_inner()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    /// Page load: fetch the translation table, apply the persisted language, render both collections.
    ///
    /// A persisted language missing from the table is replaced by the default one. Without a table the view keeps its
    /// default text and the collections are rendered with the default labels.
    pub async fn start(&self) {
        let table = match self.fetch_translations().await {
            Ok(table) => Some(table),
            Err(err) => {
                error!(target: "i18n", "failed to load translations: {}", err);
                None
            }
        };

        let (language, supported) = {
            let mut session = lock(&self.session);
            if let Some(table) = table {
                session.set_table(table);
            }

            if let Some(dropped) = session.fall_back() {
                warn!(target: "i18n", "language `{}` is not available, using `{}`", dropped, session.language());
            }

            let language = session.language().to_string();
            let supported = session.supports(&language);
            (language, supported)
        };

        if supported && self.apply_translations(&language).await.is_ok() {
            return;
        }

        self.show_language(&language);
        self.load_collections().await;
    }

    async fn fetch_translations(&self) -> Result<TranslationTable, FetchError> {
        let url = &self.sources.translations;
        let bytes = self.fetcher.fetch(url).await?;
        TranslationTable::from_json(url, &bytes)
    }

    /// Switches to `code` and re-renders everything that depends on the language.
    ///
    /// Every tagged element whose key resolves gets its text replaced (icons are kept), the others are left as they are.
    /// Both collections are then fully rendered again.
    pub async fn apply_translations(&self, code: &str) -> Result<(), LanguageError> {
        {
            let mut session = lock(&self.session);
            if let Err(err) = session.switch(code) {
                error!(target: "i18n", "{}", err);
                return Err(err);
            }

            let mut view = lock(&self.view);
            show_language(&mut *view, code);

            let mut translated = 0;
            for element in view.tagged_elements().iter_mut() {
                if let Some(text) = session.translate(&element.key) {
                    element.text = text.to_string();
                    translated += 1;
                }
            }

            info!(target: "i18n", "switched to {} ({} elements translated)", code, translated);
        }

        if let Err(err) = lock(&self.store).set(LANGUAGE_PREFERENCE_KEY, code) {
            warn!(target: "i18n", "language preference not saved: {}", err);
        }

        self.load_collections().await;
        Ok(())
    }

    fn show_language(&self, code: &str) {
        show_language(&mut *lock(&self.view), code);
    }

    pub async fn load_collections(&self) -> (CollectionOutcome, CollectionOutcome) {
        tokio::join!(self.load_projects(), self.load_articles())
    }

    pub async fn load_projects(&self) -> CollectionOutcome {
        self.load_collection(Collection::projects(&self.sources.projects), build_project_card)
            .await
    }

    pub async fn load_articles(&self) -> CollectionOutcome {
        self.load_collection(Collection::articles(&self.sources.articles), build_article_item)
            .await
    }

    /// Fetches `collection.url` and renders it into `collection.slot`, one item per entry, in order.
    pub async fn load_collection<T, B>(&self, collection: Collection<'_>, builder: B) -> CollectionOutcome
    where
        T: DeserializeOwned,
        B: Fn(&T, &Labels) -> Markup,
    {
        let slot = collection.slot;

        if !lock(&self.view).has_slot(slot) {
            error!(target: "render", "render target `{}` not found", slot);
            return CollectionOutcome::MissingTarget;
        }

        let generation = self.generations.begin(slot);

        let entries = match self.fetcher.fetch(collection.url).await {
            Ok(bytes) => parse_collection::<T>(collection.url, &bytes),
            Err(err) => Err(err),
        };

        if !self.generations.is_current(slot, generation) {
            debug!(target: "render", "dropping stale result for `{}`", slot);
            return CollectionOutcome::Superseded;
        }

        let (content, outcome) = {
            let session = lock(&self.session);

            match entries {
                Err(err) => {
                    error!(target: "render", "{}", err);
                    let message = session.message(collection.error_key);
                    (
                        html! { p.loading.error style="color: #ef4444;" { (message) } },
                        CollectionOutcome::Failed,
                    )
                }
                Ok(entries) if entries.is_empty() => {
                    let message = session.message(collection.empty_key);
                    (html! { p.loading { (message) } }, CollectionOutcome::Empty)
                }
                Ok(entries) => {
                    let labels = session.labels();
                    (
                        html! {
                            @for entry in &entries {
                                (builder(entry, &labels))
                            }
                        },
                        CollectionOutcome::Rendered(entries.len()),
                    )
                }
            }
        };

        match lock(&self.view).fill(slot, content) {
            Ok(()) => outcome,
            Err(err) => {
                error!(target: "render", "{}", err);
                CollectionOutcome::MissingTarget
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        preferences::{LANGUAGE_PREFERENCE_KEY, MemoryStore, PreferenceStore},
        view::{Document, TaggedElement},
    };
    use std::sync::Arc;
    use tokio::sync::Notify;

    const TRANSLATIONS: &str = r#"{
        "fr": {
            "nav": { "home": "Accueil", "contact": "Contact" },
            "projects": { "viewCode": "Code", "viewDemo": "Démo", "noProjects": "Aucun projet." },
            "articles": { "readArticle": "Lire l'article", "noArticles": "Aucun article." }
        },
        "en": {
            "nav": { "home": "Home", "contact": "Get in touch" },
            "projects": { "viewCode": "Code", "viewDemo": "Demo", "noProjects": "No projects yet." },
            "articles": { "readArticle": "Read article", "noArticles": "No articles yet." }
        }
    }"#;

    /// Serves fixed responses. One URL can be held back until the gate is notified.
    #[derive(Default)]
    struct FakeFetcher {
        files: FxHashMap<String, String>,
        gated: Option<(String, Arc<Notify>)>,
    }

    impl FakeFetcher {
        fn with(mut self, url: &str, body: &str) -> Self {
            self.files.insert(url.to_string(), body.to_string());
            self
        }

        fn gate(mut self, url: &str, notify: Arc<Notify>) -> Self {
            self.gated = Some((url.to_string(), notify));
            self
        }
    }

    impl Fetcher for FakeFetcher {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            if let Some((gated_url, notify)) = &self.gated {
                if gated_url == url {
                    notify.notified().await;
                }
            }

            self.files
                .get(url)
                .map(|body| body.clone().into_bytes())
                .ok_or_else(|| FetchError::Status {
                    url: url.to_string(),
                    status: 404,
                })
        }
    }

    fn document() -> Document {
        document_in("fr")
    }

    fn document_in(code: &str) -> Document {
        Document::new(code)
            .with_slot(Slot::Projects, "Chargement...")
            .with_slot(Slot::Articles, "Chargement...")
            .with_slot(Slot::LanguageIndicator, code.to_uppercase())
            .with_element(TaggedElement::new("nav.home", "Accueil"))
            .with_element(TaggedElement::new("nav.contact", "Contact").with_icon("fas fa-envelope"))
            .with_element(TaggedElement::new("nav.unknown", "Inchangé"))
    }

    fn renderer(fetcher: FakeFetcher, store: MemoryStore) -> Renderer<FakeFetcher, Document> {
        Renderer::new(fetcher, document(), store)
    }

    fn stored(code: &str) -> MemoryStore {
        let mut store = MemoryStore::default();
        store.set(LANGUAGE_PREFERENCE_KEY, code).unwrap();
        store
    }

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn test_project_card_without_image_or_demo() {
        let project = ProjectEntry {
            title: "X".into(),
            description: String::new(),
            image: None,
            technologies: vec!["Go".into()],
            github: Some("https://x".into()),
            demo: None,
            cardano: false,
        };

        let card = build_project_card(&project, &Labels::default()).into_string();

        assert_eq!(count(&card, "class=\"project-card\""), 1);
        assert!(card.contains("href=\"https://x\""));
        assert!(card.contains("</i> Code</a>"));
        assert!(!card.contains("project-link secondary"));
        assert!(!card.contains("<img"));
        assert!(card.contains("class=\"project-image-placeholder\" style=\"display: flex;\""));
        assert!(card.contains("<span class=\"tech-tag\">Go</span>"));
        assert!(!card.contains("cardano-badge"));
    }

    #[test]
    fn test_project_card_with_image_hides_placeholder() {
        let project = ProjectEntry {
            title: "Pool".into(),
            description: "Stake pool".into(),
            image: Some("assets/pool.png".into()),
            technologies: vec![],
            github: None,
            demo: Some("https://demo".into()),
            cardano: true,
        };

        let card = build_project_card(&project, &Labels::default()).into_string();

        assert!(card.contains("<img class=\"project-image\" src=\"assets/pool.png\""));
        assert!(card.contains("onerror="));
        assert!(card.contains("style=\"display: none;\""));
        assert!(card.contains("</i> Démo</a>"));
        assert!(!card.contains("fa-github"));
        assert!(card.contains("cardano-badge"));
    }

    #[test]
    fn test_card_text_is_escaped() {
        let project = ProjectEntry {
            title: "<script>".into(),
            description: "a & b".into(),
            image: None,
            technologies: vec![],
            github: None,
            demo: None,
            cardano: false,
        };

        let card = build_project_card(&project, &Labels::default()).into_string();

        assert!(card.contains("&lt;script&gt;"));
        assert!(card.contains("a &amp; b"));
    }

    #[test]
    fn test_article_item() {
        let article = ArticleEntry {
            title: "Ownership".into(),
            description: "Borrowing explained".into(),
            link: "https://blog/ownership".into(),
        };

        let item = build_article_item(&article, &Labels::default()).into_string();

        assert_eq!(count(&item, "href=\"https://blog/ownership\""), 2);
        assert!(item.contains("Lire l'article <i class=\"fas fa-arrow-right\"></i>"));
    }

    #[tokio::test]
    async fn test_projects_render_in_order() {
        let fetcher = FakeFetcher::default().with(
            "projects.json",
            r#"[
                {"title":"First","description":"","technologies":[]},
                {"title":"Second","description":"","technologies":[]},
                {"title":"Third","description":"","technologies":[]}
            ]"#,
        );
        let renderer = renderer(fetcher, MemoryStore::default());

        assert_eq!(renderer.load_projects().await, CollectionOutcome::Rendered(3));

        renderer.with_view(|view| {
            let html = view.slot(Slot::Projects).unwrap();
            assert_eq!(count(html, "class=\"project-card\""), 3);

            let first = html.find("First").unwrap();
            let second = html.find("Second").unwrap();
            let third = html.find("Third").unwrap();
            assert!(first < second && second < third);
        });
    }

    #[tokio::test]
    async fn test_empty_collection_renders_one_message() {
        let fetcher = FakeFetcher::default()
            .with("projects.json", "[]")
            .with("translations.json", TRANSLATIONS);
        let renderer = renderer(fetcher, MemoryStore::default());
        renderer.start().await;

        renderer.with_view(|view| {
            let html = view.slot(Slot::Projects).unwrap();
            assert_eq!(html, "<p class=\"loading\">Aucun projet.</p>");
            assert_eq!(count(html, "project-card"), 0);
        });
    }

    #[tokio::test]
    async fn test_fetch_failure_renders_default_error() {
        let renderer = renderer(FakeFetcher::default(), MemoryStore::default());

        assert_eq!(renderer.load_articles().await, CollectionOutcome::Failed);

        renderer.with_view(|view| {
            let html = view.slot(Slot::Articles).unwrap();
            assert!(html.contains("loading error"));
            assert!(html.contains("Erreur lors du chargement des articles."));
        });
    }

    #[tokio::test]
    async fn test_invalid_json_is_a_failure() {
        let fetcher = FakeFetcher::default().with("articles.json", "{ nope");
        let renderer = renderer(fetcher, MemoryStore::default());

        assert_eq!(renderer.load_articles().await, CollectionOutcome::Failed);
    }

    #[tokio::test]
    async fn test_missing_slot_returns_early() {
        let fetcher = FakeFetcher::default().with("projects.json", "[]");
        let renderer = Renderer::new(fetcher, Document::new("fr"), MemoryStore::default());

        assert_eq!(
            renderer.load_projects().await,
            CollectionOutcome::MissingTarget
        );
    }

    #[tokio::test]
    async fn test_apply_translations_updates_resolvable_elements() {
        let fetcher = FakeFetcher::default()
            .with("translations.json", TRANSLATIONS)
            .with("projects.json", r#"[{"title":"X","description":"","github":"https://x","demo":"https://d"}]"#)
            .with("articles.json", "[]");
        let renderer = renderer(fetcher, MemoryStore::default());
        renderer.start().await;

        renderer.apply_translations("en").await.unwrap();

        assert_eq!(renderer.language(), "en");
        renderer.with_view(|view| {
            assert_eq!(view.language(), "en");
            assert_eq!(view.element("nav.home").unwrap().text, "Home");

            let contact = view.element("nav.contact").unwrap();
            assert_eq!(contact.text, "Get in touch");
            assert_eq!(contact.icon.as_deref(), Some("fas fa-envelope"));

            assert_eq!(view.element("nav.unknown").unwrap().text, "Inchangé");
            assert_eq!(view.slot(Slot::LanguageIndicator), Some("EN"));

            // Collections were rendered again with the new labels
            assert!(view.slot(Slot::Projects).unwrap().contains("</i> Demo</a>"));
            assert_eq!(
                view.slot(Slot::Articles),
                Some("<p class=\"loading\">No articles yet.</p>")
            );
        });
    }

    #[tokio::test]
    async fn test_unknown_language_keeps_current_one() {
        let fetcher = FakeFetcher::default().with("translations.json", TRANSLATIONS);
        let renderer = renderer(fetcher, MemoryStore::default());
        renderer.start().await;
        renderer.apply_translations("en").await.unwrap();

        let result = renderer.apply_translations("de").await;

        assert!(matches!(result, Err(LanguageError::Unsupported { .. })));
        assert_eq!(renderer.language(), "en");

        let (view, session) = renderer.into_parts();
        assert_eq!(view.element("nav.home").unwrap().text, "Home");
        assert_eq!(session.language(), "en");
    }

    #[tokio::test]
    async fn test_unknown_language_does_not_touch_preference() {
        let store = Arc::new(std::sync::Mutex::new(stored("en")));

        let fetcher = FakeFetcher::default().with("translations.json", TRANSLATIONS);
        let renderer = Renderer::new(fetcher, document(), SharedStore(store.clone()));
        renderer.start().await;

        assert!(renderer.apply_translations("xx").await.is_err());
        assert_eq!(renderer.language(), "en");
        assert_eq!(
            store.lock().unwrap().get(LANGUAGE_PREFERENCE_KEY),
            Some("en".to_string())
        );
    }

    #[tokio::test]
    async fn test_unsupported_stored_language_falls_back_to_default() {
        let fetcher = FakeFetcher::default().with("translations.json", TRANSLATIONS);
        let renderer = Renderer::new(fetcher, document_in("de"), stored("de"));

        renderer.start().await;

        assert_eq!(renderer.language(), "fr");
        renderer.with_view(|view| {
            assert_eq!(view.language(), "fr");
            assert_eq!(view.slot(Slot::LanguageIndicator), Some("FR"));
            assert_eq!(view.element("nav.home").unwrap().text, "Accueil");
        });
    }

    #[tokio::test]
    async fn test_stored_language_without_translations_falls_back_to_default() {
        let fetcher = FakeFetcher::default().with("projects.json", "[]");
        let renderer = Renderer::new(fetcher, document_in("en"), stored("en"));

        renderer.start().await;

        assert_eq!(renderer.language(), "fr");
        assert!(renderer.languages().is_empty());
        renderer.with_view(|view| {
            assert_eq!(view.language(), "fr");
            assert_eq!(view.slot(Slot::LanguageIndicator), Some("FR"));
            assert_eq!(
                view.slot(Slot::Projects),
                Some("<p class=\"loading\">Aucun projet disponible pour le moment.</p>")
            );
        });
    }

    #[tokio::test]
    async fn test_custom_sources() {
        let fetcher = FakeFetcher::default()
            .with("data/i18n.json", TRANSLATIONS)
            .with("data/work.json", r#"[{"title":"Pool","description":""}]"#)
            .with("data/posts.json", "[]");
        let renderer = renderer(fetcher, stored("en")).with_sources(SiteSources {
            projects: "data/work.json".into(),
            articles: "data/posts.json".into(),
            translations: "data/i18n.json".into(),
        });

        renderer.start().await;

        assert_eq!(renderer.language(), "en");
        renderer.with_view(|view| {
            assert!(view.slot(Slot::Projects).unwrap().contains("Pool"));
            assert_eq!(
                view.slot(Slot::Articles),
                Some("<p class=\"loading\">No articles yet.</p>")
            );
        });
    }

    #[tokio::test]
    async fn test_languages_come_from_the_table() {
        let fetcher = FakeFetcher::default().with("translations.json", TRANSLATIONS);
        let renderer = renderer(fetcher, MemoryStore::default());

        assert!(renderer.languages().is_empty());
        renderer.start().await;

        assert_eq!(renderer.languages(), vec!["en".to_string(), "fr".to_string()]);
    }

    #[tokio::test]
    async fn test_preference_survives_reload() {
        let store = Arc::new(std::sync::Mutex::new(MemoryStore::default()));

        let first = Renderer::new(
            FakeFetcher::default().with("translations.json", TRANSLATIONS),
            document(),
            SharedStore(store.clone()),
        );
        first.start().await;
        first.apply_translations("en").await.unwrap();

        // Reload: a fresh session reads the persisted preference
        let second = Renderer::new(
            FakeFetcher::default().with("translations.json", TRANSLATIONS),
            document(),
            SharedStore(store),
        );
        second.start().await;

        assert_eq!(second.language(), "en");
        second.with_view(|view| {
            assert_eq!(view.element("nav.home").unwrap().text, "Home");
        });
    }

    struct SharedStore(Arc<std::sync::Mutex<MemoryStore>>);

    impl PreferenceStore for SharedStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.lock().unwrap().get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), crate::errors::StoreError> {
            self.0.lock().unwrap().set(key, value)
        }
    }

    #[tokio::test]
    async fn test_missing_translations_still_render_collections() {
        let fetcher = FakeFetcher::default().with(
            "projects.json",
            r#"[{"title":"X","description":"","demo":"https://d"}]"#,
        );
        let renderer = renderer(fetcher, MemoryStore::default());

        renderer.start().await;

        assert_eq!(renderer.language(), "fr");
        renderer.with_view(|view| {
            assert!(view.slot(Slot::Projects).unwrap().contains("</i> Démo</a>"));
            assert!(view.slot(Slot::Articles).unwrap().contains("loading error"));
            assert_eq!(view.element("nav.home").unwrap().text, "Accueil");
        });
    }

    #[tokio::test]
    async fn test_stale_load_is_discarded() {
        let gate = Arc::new(Notify::new());
        let fetcher = FakeFetcher::default()
            .with("old.json", r#"[{"title":"Old","description":""}]"#)
            .with("new.json", r#"[{"title":"New","description":""}]"#)
            .gate("old.json", gate.clone());
        let renderer = renderer(fetcher, MemoryStore::default());

        let (old, new) = tokio::join!(
            renderer.load_collection(Collection::projects("old.json"), build_project_card),
            async {
                let outcome = renderer
                    .load_collection(Collection::projects("new.json"), build_project_card)
                    .await;
                gate.notify_one();
                outcome
            }
        );

        assert_eq!(old, CollectionOutcome::Superseded);
        assert_eq!(new, CollectionOutcome::Rendered(1));
        renderer.with_view(|view| {
            let html = view.slot(Slot::Projects).unwrap();
            assert!(html.contains("New"));
            assert!(!html.contains("Old"));
        });
    }
}
