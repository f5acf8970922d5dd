//! The CV document shown in the preview frame and offered for download.
use std::path::{Path, PathBuf};

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Characters that can't appear as-is in a path segment of a URL.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CvDocument {
    /// Directory of the file, relative to the site root, `/`-separated.
    pub directory: String,
    pub file_name: String,
}

impl Default for CvDocument {
    fn default() -> Self {
        Self {
            directory: "assets/cv".into(),
            file_name: "CV Olivier.pdf".into(),
        }
    }
}

impl CvDocument {
    /// URL of the document relative to the site root, each segment percent-encoded.
    ///
    /// ## Example
    /// ```rs
    /// use vitrine::cv::CvDocument;
    ///
    /// assert_eq!(CvDocument::default().encoded_url(), "assets/cv/CV%20Olivier.pdf");
    /// ```
    pub fn encoded_url(&self) -> String {
        self.directory
            .split('/')
            .chain(std::iter::once(self.file_name.as_str()))
            .filter(|segment| !segment.is_empty())
            .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn file_path(&self, site_root: &Path) -> PathBuf {
        self.directory
            .split('/')
            .filter(|segment| !segment.is_empty())
            .fold(site_root.to_path_buf(), |path, segment| path.join(segment))
            .join(&self.file_name)
    }
}
