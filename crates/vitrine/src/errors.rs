//! Error types for Vitrine.
use std::fmt::{self, Debug, Formatter};
use std::path::PathBuf;
use thiserror::Error;

use crate::view::Slot;

macro_rules! impl_debug_for_error {
    ($($t:ty),*) => {
        $(
            impl Debug for $t {
                fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                    // Errors returned from main are shown through Debug, while thiserror implements Display.
                    write!(f, "{}", self)
                }
            }
        )*
    };
}

#[derive(Error)]
pub enum FetchError {
    #[error("Request for `{url}` failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("Request for `{url}` returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to read `{path}`")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("`{url}` is not valid JSON for this collection")]
    InvalidJson {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error)]
pub enum LanguageError {
    #[error("Unsupported language: {code}")]
    Unsupported { code: String },
}

#[derive(Error)]
pub enum StoreError {
    #[error("Failed to read preferences from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write preferences to {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Preferences file {path} is malformed")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error)]
pub enum ViewError {
    #[error("Render target `{0}` not found")]
    MissingSlot(Slot),
}

#[derive(Error, Debug)]
pub enum VitrineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Language(#[from] LanguageError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    View(#[from] ViewError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl_debug_for_error!(FetchError, LanguageError, StoreError, ViewError);
