#![doc = include_str!("../README.md")]

// Data and localization
pub mod content;
pub mod errors;
pub mod i18n;
pub mod preferences;
pub mod session;

// Rendering
pub mod fetch;
pub mod page;
pub mod render;
pub mod view;

// Page features without a renderer counterpart
pub mod contact;
pub mod cv;

pub use content::{ArticleEntry, ProjectEntry};
pub use errors::VitrineError;
pub use fetch::{DirFetcher, Fetcher, HttpFetcher};
pub use i18n::TranslationTable;
pub use preferences::{FileStore, MemoryStore, PreferenceStore};
pub use render::{CollectionOutcome, Renderer, SiteSources, build_article_item, build_project_card};
pub use session::{Labels, Session};
pub use view::{Document, Slot, TaggedElement, View};

/// The version of Vitrine being used.
///
/// Written in the `generator` meta tag of the rendered page.
pub const GENERATOR: &str = concat!("Vitrine v", env!("CARGO_PKG_VERSION"));
