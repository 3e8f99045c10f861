use std::path::Path;

use crate::error::{ClubError, Result};

/// The single owner an uploaded image is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageOwner {
    Project(u32),
    Event(u32),
}

impl ImageOwner {
    /// Build an owner from two independent selector values. Exactly one of
    /// them must be set.
    pub fn from_selection(project_id: Option<u32>, event_id: Option<u32>) -> Result<Self> {
        match (project_id, event_id) {
            (Some(id), None) => Ok(ImageOwner::Project(id)),
            (None, Some(id)) => Ok(ImageOwner::Event(id)),
            _ => Err(ClubError::InvalidOwner),
        }
    }

    /// Multipart field name and value identifying this owner.
    pub(crate) fn form_field(&self) -> (&'static str, String) {
        match self {
            ImageOwner::Project(id) => ("project_id", id.to_string()),
            ImageOwner::Event(id) => ("event_id", id.to_string()),
        }
    }
}

/// A file held in memory, ready to be sent as the `file` part of an upload.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadFile")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, keeping its base name for the upload.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|source| ClubError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self { file_name, bytes })
    }

    /// MIME type guessed from the file extension.
    pub fn mime_type(&self) -> &'static str {
        let ext = self
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "gif" => "image/gif",
            "webp" => "image/webp",
            "zip" => "application/zip",
            "gz" => "application/gzip",
            "tar" => "application/x-tar",
            "7z" => "application/x-7z-compressed",
            "rar" => "application/vnd.rar",
            "bz2" => "application/x-bzip2",
            _ => "application/octet-stream",
        }
    }
}
