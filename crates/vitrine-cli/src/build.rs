use std::path::{Path, PathBuf};
use std::time::Instant;

use colored::Colorize;
use tracing::{info, warn};
use vitrine::{
    i18n::DEFAULT_LANGUAGE,
    page::{self, PageOptions},
    Document, FileStore, Fetcher, MemoryStore, PreferenceStore, Renderer, VitrineError,
};

use crate::consts::DEFAULT_DOCUMENT;
use crate::logging::{format_elapsed_time, FormatElapsedTimeOptions};

/// Renders the pages of the site in `site` into `output` (by default the site directory itself).
///
/// `index.html` is rendered in the persisted language, or in `language` which then becomes the persisted one. Every
/// language of the translation table also gets its own page, see [`page::page_file`], which the language selector links
/// to. Content is fetched through `fetcher`, from the site directory or from a running server.
pub async fn build_site<F: Fetcher + Clone>(
    site: &Path,
    fetcher: F,
    language: Option<&str>,
    output: Option<PathBuf>,
) -> Result<Vec<PathBuf>, VitrineError> {
    let start_time = Instant::now();
    let output = output.unwrap_or_else(|| site.to_path_buf());

    let store = FileStore::open(site.join(FileStore::DEFAULT_PATH))?;
    let renderer = render(fetcher.clone(), store, language).await;

    let mut languages = renderer.languages();
    if languages.is_empty() {
        languages.push(renderer.language());
    }
    let options = page_options(site).with_languages(&languages);

    let mut pages = vec![write_page(&output.join(DEFAULT_DOCUMENT), renderer, &options).await?];

    // Rendered apart so the persisted preference stays the one of index.html
    for code in &languages {
        let variant = render(fetcher.clone(), MemoryStore::default(), Some(code.as_str())).await;
        pages.push(write_page(&output.join(page::page_file(code)), variant, &options).await?);
    }

    info!(
        name: "build",
        "{} pages in {}",
        pages.len(),
        format_elapsed_time(start_time.elapsed(), &FormatElapsedTimeOptions::default())
    );

    Ok(pages)
}

async fn render<F: Fetcher>(
    fetcher: F,
    store: impl PreferenceStore + 'static,
    language: Option<&str>,
) -> Renderer<F, Document> {
    // The template is written in the default language, `start` moves it to the restored one
    let renderer = Renderer::new(fetcher, page::portfolio_document(DEFAULT_LANGUAGE), store);
    renderer.start().await;

    if let Some(code) = language {
        if code != renderer.language() && renderer.apply_translations(code).await.is_err() {
            warn!(name: "build", "keeping language {}", renderer.language());
        }
    }

    renderer
}

async fn write_page<F: Fetcher>(
    path: &Path,
    renderer: Renderer<F, Document>,
    options: &PageOptions,
) -> Result<PathBuf, VitrineError> {
    let labels = renderer.labels();
    let (document, _) = renderer.into_parts();
    let html = page::render_page(&document, &labels, options).into_string();

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, html).await?;

    info!(name: "build", "{} ({})", path.display(), document.language().to_uppercase());

    Ok(path.to_path_buf())
}

fn page_options(site: &Path) -> PageOptions {
    let mut options = PageOptions::default();

    options.profile_image_available = site.join(&options.profile_image).is_file();
    if !options.profile_image_available {
        info!(name: "build", "{} not found, showing the placeholder", options.profile_image.dimmed());
    }

    if !options.cv.file_path(site).is_file() {
        warn!(name: "build", "CV not found at {}", options.cv.file_path(site).display());
    }

    options
}
