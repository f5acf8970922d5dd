//! Where the renderer gets its JSON resources from.
//!
//! The renderer only ever asks for relative URLs (`projects.json`, `translations.json`, ...). A [`Fetcher`] decides
//! what they are relative to: a directory on disk with [`DirFetcher`], or a running static host with [`HttpFetcher`].
use std::future::Future;
use std::path::{Component, Path, PathBuf};

use log::debug;

use crate::errors::FetchError;

pub trait Fetcher {
    /// Fetches the body of `url`. Non-success responses are errors.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;
}

/// Reads resources from a directory, like a static host serving that directory would.
#[derive(Debug, Clone)]
pub struct DirFetcher {
    root: PathBuf,
}

impl DirFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, url: &str) -> Option<PathBuf> {
        let relative = Path::new(url.trim_start_matches('/'));

        // Only plain relative paths, nothing that could leave the root
        if relative
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
        {
            Some(self.root.join(relative))
        } else {
            None
        }
    }
}

impl Fetcher for DirFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let Some(path) = self.resolve(url) else {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: 403,
            });
        };

        debug!(target: "fetch", "reading {}", path.display());

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
            Err(source) => Err(FetchError::Read { path, source }),
        }
    }
}

/// Fetches resources over HTTP from a base URL, e.g. `http://localhost:3000/`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    base_url: String,
}

impl HttpFetcher {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Self { base_url }
    }

    pub fn url_for(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("{}{}", self.base_url, url.trim_start_matches('/'))
        }
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let full_url = self.url_for(url);
        let requested = url.to_string();

        debug!(target: "fetch", "GET {}", full_url);

        // ureq is blocking
        let result = tokio::task::spawn_blocking(move || {
            let response = ureq::get(&full_url).call()?;
            response.into_body().read_to_vec()
        })
        .await;

        match result {
            Ok(Ok(bytes)) => Ok(bytes),
            Ok(Err(ureq::Error::StatusCode(status))) => Err(FetchError::Status {
                url: requested,
                status,
            }),
            Ok(Err(err)) => Err(FetchError::Transport {
                url: requested,
                reason: err.to_string(),
            }),
            Err(join_err) => Err(FetchError::Transport {
                url: requested,
                reason: join_err.to_string(),
            }),
        }
    }
}
