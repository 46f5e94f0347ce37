//! Sermon media files
//!
//! A sermon's video, audio, and PDF fields hold a URL to an uploaded file, a
//! URL to a file elsewhere, or a page/embed on a media site. Files under the
//! uploads URL are resolved to disk so their size can be shown.

use camino::{Utf8Path, Utf8PathBuf};
use indicatif::HumanBytes;
use serde::Serialize;
use std::fmt;
use tracing::debug;
use url::Url;

/// Extensions recognised as downloadable media
pub const MEDIA_EXTENSIONS: &[&str] = &[
    // audio
    "mp3", "m4a", "m4b", "aac", "ogg", "oga", "wav", "wma", "flac", "mka",
    // video
    "mp4", "m4v", "mov", "wmv", "avi", "mpg", "mpeg", "ogv", "webm", "3gp", "3g2", "flv", "mkv",
    // documents
    "pdf",
];

/// Media fields of a sermon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Audio,
    Pdf,
}

impl MediaKind {
    pub const ALL: [MediaKind; 3] = [Self::Video, Self::Audio, Self::Pdf];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Pdf => "pdf",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw sermon fields as stored with the post
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SermonMeta {
    pub video: String,
    pub audio: String,
    pub pdf: String,
    pub has_full_text: bool,
}

impl SermonMeta {
    pub fn get(&self, kind: MediaKind) -> &str {
        match kind {
            MediaKind::Video => &self.video,
            MediaKind::Audio => &self.audio,
            MediaKind::Pdf => &self.pdf,
        }
    }
}

/// Where uploaded files live on disk and on the web
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadsDir {
    pub base_dir: Utf8PathBuf,
    pub base_url: String,
}

impl UploadsDir {
    pub fn new(base_dir: impl Into<Utf8PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Disk path for a URL under the uploads URL
    ///
    /// `None` for URLs elsewhere, and for paths escaping the uploads directory.
    pub fn local_path(&self, url: &str) -> Option<Utf8PathBuf> {
        if self.base_url.is_empty() {
            return None;
        }

        let relative = url.trim().strip_prefix(&self.base_url)?;
        let relative = relative.split(['?', '#']).next().unwrap_or_default();
        let relative = relative.strip_prefix('/')?;

        if relative.is_empty() || relative.split('/').any(|part| part == "..") {
            return None;
        }

        Some(self.base_dir.join(relative))
    }
}

/// File details for one media field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MediaFile {
    pub url: String,
    /// Lowercased, only for known media extensions
    pub extension: Option<String>,
    /// Local files that exist only
    pub path: Option<Utf8PathBuf>,
    pub size_bytes: Option<u64>,
    /// e.g. "30.00 MiB"
    pub size: Option<String>,
    /// The URL, when it points at a downloadable file
    pub download_url: Option<String>,
}

impl MediaFile {
    /// Resolve a media field
    pub fn resolve(raw: &str, uploads: &UploadsDir) -> Self {
        let url = raw.trim().to_string();
        if url.is_empty() {
            return Self::default();
        }

        let extension = media_extension(&url);

        let (path, size_bytes) = match uploads.local_path(&url) {
            Some(path) => match file_size(&path) {
                Some(bytes) => (Some(path), Some(bytes)),
                None => {
                    debug!("Sermon media not found on disk: {}", path);
                    (None, None)
                }
            },
            None => (None, None),
        };

        let download_url = extension.as_ref().map(|_| url.clone());

        Self {
            url,
            extension,
            path,
            size_bytes,
            size: size_bytes.map(|bytes| HumanBytes(bytes).to_string()),
            download_url,
        }
    }

    pub fn is_local(&self) -> bool {
        self.path.is_some()
    }
}

/// Media details for a sermon
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SermonData {
    pub video: MediaFile,
    pub audio: MediaFile,
    pub pdf: MediaFile,
    pub has_full_text: bool,
}

impl SermonData {
    pub fn from_meta(meta: &SermonMeta, uploads: &UploadsDir) -> Self {
        Self {
            video: MediaFile::resolve(meta.get(MediaKind::Video), uploads),
            audio: MediaFile::resolve(meta.get(MediaKind::Audio), uploads),
            pdf: MediaFile::resolve(meta.get(MediaKind::Pdf), uploads),
            has_full_text: meta.has_full_text,
        }
    }

    pub fn media(&self, kind: MediaKind) -> &MediaFile {
        match kind {
            MediaKind::Video => &self.video,
            MediaKind::Audio => &self.audio,
            MediaKind::Pdf => &self.pdf,
        }
    }

    /// Whether at least one field is a downloadable file
    pub fn has_download(&self) -> bool {
        MediaKind::ALL
            .iter()
            .any(|kind| self.media(*kind).download_url.is_some())
    }

    pub fn has_full_text(&self) -> bool {
        self.has_full_text
    }
}

/// Known media extension of a URL's last path segment
fn media_extension(raw: &str) -> Option<String> {
    let path = match Url::parse(raw) {
        Ok(url) => url.path().to_string(),
        Err(_) if !raw.contains(['<', '[', ' ']) => raw.split(['?', '#']).next()?.to_string(),
        Err(_) => return None,
    };

    let file_name = path.rsplit('/').next()?;
    let extension = Utf8Path::new(file_name).extension()?.to_ascii_lowercase();

    MEDIA_EXTENSIONS
        .contains(&extension.as_str())
        .then_some(extension)
}

fn file_size(path: &Utf8Path) -> Option<u64> {
    let metadata = std::fs::metadata(path).ok()?;
    metadata.is_file().then(|| metadata.len())
}
