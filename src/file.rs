//! Document files.

use crate::error::{EversignError, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where the contents of a [`File`] come from. Exactly one alternative is
/// active at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// Local file that still has to be uploaded.
    Path(PathBuf),
    /// File already uploaded to the service.
    Id(String),
    /// Publicly reachable URL the service fetches.
    Url(String),
    /// Base64-encoded contents.
    Base64(String),
}

/// A file attached to a document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(from = "FileWire", into = "FileWire")]
pub struct File {
    name: Option<String>,
    source: Option<FileSource>,
    pages: Option<i64>,
    total_pages: Option<i64>,
}

impl File {
    pub fn new() -> Self {
        Self::default()
    }

    /// File pointing at an already uploaded file id.
    pub fn from_id(name: impl Into<String>, file_id: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            source: Some(FileSource::Id(file_id.into())),
            ..Self::default()
        }
    }

    /// File backed by a local path. Fails if the path does not exist.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let mut file = Self::default();
        file.set_file_path(path)?;
        Ok(file)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn source(&self) -> Option<&FileSource> {
        self.source.as_ref()
    }

    pub fn file_path(&self) -> Option<&Path> {
        match &self.source {
            Some(FileSource::Path(path)) => Some(path),
            _ => None,
        }
    }

    pub fn file_id(&self) -> Option<&str> {
        match &self.source {
            Some(FileSource::Id(id)) => Some(id),
            _ => None,
        }
    }

    pub fn file_url(&self) -> Option<&str> {
        match &self.source {
            Some(FileSource::Url(url)) => Some(url),
            _ => None,
        }
    }

    pub fn file_base64(&self) -> Option<&str> {
        match &self.source {
            Some(FileSource::Base64(data)) => Some(data),
            _ => None,
        }
    }

    /// Page count reported by the service.
    pub fn pages(&self) -> Option<i64> {
        self.pages
    }

    pub fn total_pages(&self) -> Option<i64> {
        self.total_pages
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn set_file_id(&mut self, file_id: impl Into<String>) {
        self.source = Some(FileSource::Id(file_id.into()));
    }

    pub fn set_file_url(&mut self, file_url: impl Into<String>) {
        self.source = Some(FileSource::Url(file_url.into()));
    }

    pub fn set_file_base64(&mut self, data: impl Into<String>) {
        self.source = Some(FileSource::Base64(data.into()));
    }

    /// Encode raw bytes as the base64 alternative.
    pub fn set_file_bytes(&mut self, bytes: &[u8]) {
        self.set_file_base64(BASE64.encode(bytes));
    }

    /// Point at a local file. The previous source is kept if the path does
    /// not exist.
    pub fn set_file_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(EversignError::invalid(format!(
                "The file on the specified path cannot be found: {}",
                path.display()
            )));
        }
        self.source = Some(FileSource::Path(path.to_path_buf()));
        Ok(())
    }

    /// Base name of the local path, if any.
    pub(crate) fn path_base_name(&self) -> Option<String> {
        self.file_path()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
    }

    pub(crate) fn needs_upload(&self) -> bool {
        matches!(self.source, Some(FileSource::Path(_)))
    }
}

/// On-the-wire shape. A local path never leaves the process.
#[derive(Default, Deserialize, Serialize)]
struct FileWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(
        default,
        with = "crate::wire::opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    file_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file_base64: Option<String>,
    #[serde(
        default,
        with = "crate::wire::opt_lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pages: Option<i64>,
    #[serde(
        default,
        with = "crate::wire::opt_lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    total_pages: Option<i64>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl From<FileWire> for File {
    fn from(wire: FileWire) -> Self {
        let source = non_empty(wire.file_id)
            .map(FileSource::Id)
            .or_else(|| non_empty(wire.file_url).map(FileSource::Url))
            .or_else(|| non_empty(wire.file_base64).map(FileSource::Base64));
        Self {
            name: wire.name,
            source,
            pages: wire.pages,
            total_pages: wire.total_pages,
        }
    }
}

impl From<File> for FileWire {
    fn from(file: File) -> Self {
        let mut wire = FileWire {
            name: file.name,
            pages: file.pages,
            total_pages: file.total_pages,
            ..FileWire::default()
        };
        match file.source {
            Some(FileSource::Id(id)) => wire.file_id = Some(id),
            Some(FileSource::Url(url)) => wire.file_url = Some(url),
            Some(FileSource::Base64(data)) => wire.file_base64 = Some(data),
            Some(FileSource::Path(_)) | None => {}
        }
        wire
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_a_source_clears_the_others() {
        let mut file = File::new();
        file.set_file_id("abc");
        assert_eq!(file.file_id(), Some("abc"));

        file.set_file_url("https://example.com/a.pdf");
        assert_eq!(file.file_url(), Some("https://example.com/a.pdf"));
        assert!(file.file_id().is_none());

        file.set_file_base64("JVBERi0=");
        assert_eq!(file.file_base64(), Some("JVBERi0="));
        assert!(file.file_url().is_none());

        let tmp = tempfile::NamedTempFile::new().unwrap();
        file.set_file_path(tmp.path()).unwrap();
        assert_eq!(file.file_path(), Some(tmp.path()));
        assert!(file.file_base64().is_none());
        assert!(file.file_id().is_none());
        assert!(file.file_url().is_none());
    }

    #[test]
    fn test_missing_path_is_rejected() {
        let mut file = File::from_id("contract", "abc");
        let err = file
            .set_file_path("/definitely/not/here/contract.pdf")
            .unwrap_err();
        assert!(err.is_local());
        assert_eq!(file.file_id(), Some("abc"));
    }

    #[test]
    fn test_file_bytes_are_base64_encoded() {
        let mut file = File::new();
        file.set_file_bytes(b"%PDF-");
        assert_eq!(file.file_base64(), Some("JVBERi0="));
    }

    #[test]
    fn test_path_is_not_serialized() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let mut file = File::from_path(tmp.path()).unwrap();
        file.set_name("Contract");

        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "Contract" }));
    }

    #[test]
    fn test_deserialization() {
        let json = r#"{
            "name": "test_file_name",
            "file_id": "test_file_id",
            "file_url": null,
            "pages": 1
        }"#;

        let file: File = serde_json::from_str(json).unwrap();
        assert_eq!(file.name(), Some("test_file_name"));
        assert_eq!(file.file_id(), Some("test_file_id"));
        assert!(file.file_url().is_none());
        assert_eq!(file.pages(), Some(1));
        assert!(file.total_pages().is_none());
    }
}
