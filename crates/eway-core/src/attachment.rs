// ── Identity document attachments ──
//
// A passenger proves their category with a file: an ID photo for adults,
// a student document for students. Each file is tracked through its own
// handle, independent of the rest of the purchase form.

use std::fmt;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, warn};

use crate::model::RiderCategory;

/// Which proof a file stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentKind {
    IdPhoto,
    StudentDocument,
}

impl AttachmentKind {
    /// The proof a rider of `category` must attach.
    pub fn required_for(category: RiderCategory) -> Self {
        match category {
            RiderCategory::Adult => Self::IdPhoto,
            RiderCategory::Student => Self::StudentDocument,
        }
    }
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::IdPhoto => "ID photo",
            Self::StudentDocument => "student document",
        })
    }
}

/// Lifecycle of an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadState {
    /// Selected but not read yet.
    Pending,
    /// Read and encoded; ready to accompany the purchase.
    Uploaded { data_url: String, size: usize },
    /// Could not be read.
    Failed { reason: String },
}

/// Handle on one attached file.
#[derive(Debug, Clone)]
pub struct Attachment {
    kind: AttachmentKind,
    source: PathBuf,
    state: UploadState,
}

impl Attachment {
    /// A handle for `path`, not yet read.
    pub fn pending(kind: AttachmentKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            source: path.into(),
            state: UploadState::Pending,
        }
    }

    /// A handle over bytes already in memory.
    pub fn from_bytes(kind: AttachmentKind, name: impl Into<PathBuf>, bytes: &[u8]) -> Self {
        let mut attachment = Self::pending(kind, name);
        attachment.state = encode(&attachment.source, bytes);
        attachment
    }

    /// Read the file and move to `Uploaded` or `Failed`.
    ///
    /// Loading an already uploaded handle is a no-op; a failed one is retried.
    pub fn load(&mut self) -> &UploadState {
        if matches!(self.state, UploadState::Uploaded { .. }) {
            return &self.state;
        }
        self.state = match std::fs::read(&self.source) {
            Ok(bytes) => encode(&self.source, &bytes),
            Err(e) => {
                warn!(path = %self.source.display(), error = %e, "attachment unreadable");
                UploadState::Failed {
                    reason: format!("cannot read {}: {e}", self.source.display()),
                }
            }
        };
        &self.state
    }

    pub fn kind(&self) -> AttachmentKind {
        self.kind
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    pub fn is_uploaded(&self) -> bool {
        matches!(self.state, UploadState::Uploaded { .. })
    }

    /// The `data:<mime>;base64,...` form, once uploaded.
    pub fn data_url(&self) -> Option<&str> {
        match &self.state {
            UploadState::Uploaded { data_url, .. } => Some(data_url.as_str()),
            _ => None,
        }
    }
}

fn encode(source: &Path, bytes: &[u8]) -> UploadState {
    if bytes.is_empty() {
        return UploadState::Failed {
            reason: format!("{} is empty", source.display()),
        };
    }
    let mime = mime_for(source);
    debug!(path = %source.display(), size = bytes.len(), mime, "attachment encoded");
    UploadState::Uploaded {
        data_url: format!("data:{mime};base64,{}", STANDARD.encode(bytes)),
        size: bytes.len(),
    }
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn required_kind_follows_category() {
        assert_eq!(
            AttachmentKind::required_for(RiderCategory::Adult),
            AttachmentKind::IdPhoto
        );
        assert_eq!(
            AttachmentKind::required_for(RiderCategory::Student),
            AttachmentKind::StudentDocument
        );
    }

    #[test]
    fn from_bytes_builds_data_url() {
        let a = Attachment::from_bytes(AttachmentKind::IdPhoto, "me.PNG", b"abc");
        assert!(a.is_uploaded());
        assert_eq!(a.data_url(), Some("data:image/png;base64,YWJj"));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(b"%PDF-1.4").unwrap();

        let mut a = Attachment::pending(AttachmentKind::StudentDocument, file.path());
        assert_eq!(a.state(), &UploadState::Pending);

        match a.load() {
            UploadState::Uploaded { data_url, size } => {
                assert!(data_url.starts_with("data:application/pdf;base64,"));
                assert_eq!(*size, 8);
            }
            other => panic!("expected Uploaded, got {other:?}"),
        }
    }

    #[test]
    fn missing_or_empty_file_fails() {
        let mut missing = Attachment::pending(AttachmentKind::IdPhoto, "/nonexistent/id.jpg");
        assert!(matches!(missing.load(), UploadState::Failed { .. }));
        assert!(missing.data_url().is_none());

        let empty = Attachment::from_bytes(AttachmentKind::IdPhoto, "id.jpg", b"");
        assert!(matches!(empty.state(), UploadState::Failed { reason } if reason.contains("empty")));
    }
}
