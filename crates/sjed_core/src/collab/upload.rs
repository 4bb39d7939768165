//! Document upload ingestion.
//!
//! Each file is checked against a MIME allowlist, handed to a
//! [`DocumentStore`], and described by an [`UploadRecord`] whose file type
//! and jurisdiction are guessed from the filename.

use crate::clock::Clock;
use crate::model::{CaseFile, FileType, Jurisdiction, NewCaseFile, Timestamp};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const UNSUPPORTED_TYPE_ERROR: &str = "File type not supported";
pub const STORE_FAILED_ERROR: &str = "Blob upload failed";

/// Accepted MIME types. An empty type is accepted as well.
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "text/plain",
    "text/csv",
    "image/jpeg",
    "image/png",
    "image/gif",
];

/// First matching keyword wins, in table order.
const JURISDICTION_KEYWORDS: &[(Jurisdiction, &[&str])] = &[
    (Jurisdiction::Fl, &["fl", "florida", "brevard"]),
    (Jurisdiction::Tn, &["tn", "tennessee"]),
    (Jurisdiction::In, &["in", "indiana"]),
    (Jurisdiction::Co, &["co", "colorado"]),
];

const FILE_TYPE_KEYWORDS: &[(FileType, &[&str])] = &[
    (FileType::Complaint, &["complaint"]),
    (FileType::Order, &["order"]),
    (FileType::Judgment, &["judgment", "fj"]),
    (FileType::Affidavit, &["affidavit"]),
    (FileType::Letter, &["ltr", "letter"]),
    (FileType::Notice, &["notice"]),
];

#[derive(Debug)]
pub enum UploadError {
    /// The batch contained no files.
    NoFiles,
}

impl Display for UploadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoFiles => write!(f, "no files provided"),
        }
    }
}

impl Error for UploadError {}

/// One file received from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    /// Declared MIME type; may be empty.
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// External storage for document bytes.
pub trait DocumentStore {
    /// Stores `bytes` under a name derived from `name` and returns its URL.
    fn put(&self, name: &str, bytes: &[u8]) -> std::io::Result<String>;
    /// URLs of every stored document.
    fn list(&self) -> std::io::Result<Vec<String>>;
    /// Deletes the document at `url`. Returns `false` when nothing was stored there.
    fn remove(&self, url: &str) -> std::io::Result<bool>;
}

impl<T: DocumentStore + ?Sized> DocumentStore for &T {
    fn put(&self, name: &str, bytes: &[u8]) -> std::io::Result<String> {
        (**self).put(name, bytes)
    }

    fn list(&self) -> std::io::Result<Vec<String>> {
        (**self).list()
    }

    fn remove(&self, url: &str) -> std::io::Result<bool> {
        (**self).remove(url)
    }
}

/// Stores documents as files under `<root>/documents/`.
#[derive(Debug, Clone)]
pub struct DirectoryDocumentStore {
    root: PathBuf,
}

impl DirectoryDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn documents_dir(&self) -> PathBuf {
        self.root.join("documents")
    }

    /// Maps a `file://` URL back to a path directly inside the documents directory.
    fn local_path(&self, url: &str) -> Option<PathBuf> {
        let path = Path::new(url.strip_prefix("file://")?);
        let dir = self.documents_dir();
        (path.parent() == Some(dir.as_path())).then(|| path.to_path_buf())
    }
}

impl DocumentStore for DirectoryDocumentStore {
    fn put(&self, name: &str, bytes: &[u8]) -> std::io::Result<String> {
        let dir = self.documents_dir();
        std::fs::create_dir_all(&dir)?;
        let file_name = Path::new(name)
            .file_name()
            .map(|value| value.to_string_lossy().into_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| "upload".to_string());
        let unique = format!("{}-{}", uuid::Uuid::new_v4().simple(), file_name);
        let path = dir.join(unique);
        std::fs::write(&path, bytes)?;
        Ok(format!("file://{}", path.display()))
    }

    fn list(&self) -> std::io::Result<Vec<String>> {
        let entries = match std::fs::read_dir(self.documents_dir()) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err),
        };
        let mut urls = Vec::new();
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                urls.push(format!("file://{}", entry.path().display()));
            }
        }
        urls.sort();
        Ok(urls)
    }

    fn remove(&self, url: &str) -> std::io::Result<bool> {
        let Some(path) = self.local_path(url) else {
            return Ok(false);
        };
        match std::fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err),
        }
    }
}

/// Deletes the stored bytes behind `file`, if it has a URL.
///
/// Call after `CaseStore::delete_file`; the record and the bytes are
/// removed independently.
pub fn release_document<S: DocumentStore>(
    documents: &S,
    file: &CaseFile,
) -> std::io::Result<bool> {
    let Some(url) = file.url.as_deref() else {
        return Ok(false);
    };
    let removed = documents.remove(url)?;
    info!(
        "event=document_release module=upload status={} file_id={}",
        if removed { "ok" } else { "not_found" },
        file.id
    );
    Ok(removed)
}

/// Result of ingesting one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRecord {
    pub title: String,
    /// `None` when the file was rejected or could not be stored.
    pub url: Option<String>,
    pub size: u64,
    pub file_type: FileType,
    pub jurisdiction: Option<Jurisdiction>,
    pub error: Option<&'static str>,
    pub uploaded_at: Timestamp,
}

impl UploadRecord {
    pub fn is_stored(&self) -> bool {
        self.error.is_none()
    }

    fn failed(file: &UploadFile, error: &'static str, now: Timestamp) -> Self {
        Self {
            title: file.name.clone(),
            url: None,
            size: file.size(),
            file_type: FileType::Other,
            jurisdiction: None,
            error: Some(error),
            uploaded_at: now,
        }
    }

    /// Case file create request carrying this upload's metadata.
    pub fn into_new_case_file(self) -> NewCaseFile {
        let mut file = NewCaseFile::new(self.title, self.file_type);
        file.jurisdiction = self.jurisdiction;
        file.url = self.url;
        file.size = Some(self.size);
        file.date = Some(self.uploaded_at.date_naive());
        file
    }
}

pub fn is_allowed_mime(mime: &str) -> bool {
    let mime = mime.trim();
    mime.is_empty() || ALLOWED_MIME_TYPES.contains(&mime)
}

/// Guesses the jurisdiction from a filename by plain substring match.
pub fn infer_jurisdiction(file_name: &str) -> Option<Jurisdiction> {
    let lower = file_name.to_lowercase();
    JURISDICTION_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lower.contains(keyword)))
        .map(|(jurisdiction, _)| *jurisdiction)
}

pub fn infer_file_type(file_name: &str) -> FileType {
    let lower = file_name.to_lowercase();
    FILE_TYPE_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lower.contains(keyword)))
        .map_or(FileType::Other, |(file_type, _)| *file_type)
}

/// Ingests a batch of uploads.
///
/// # Errors
/// - `UploadError::NoFiles` for an empty batch.
///
/// Individual rejections and storage failures are reported per record.
pub fn ingest_uploads<S: DocumentStore>(
    files: &[UploadFile],
    store: &S,
    clock: &dyn Clock,
) -> Result<Vec<UploadRecord>, UploadError> {
    if files.is_empty() {
        warn!("event=upload_ingest module=collab status=rejected reason=no_files");
        return Err(UploadError::NoFiles);
    }

    let records: Vec<UploadRecord> = files
        .iter()
        .map(|file| ingest_one(file, store, clock.now()))
        .collect();

    info!(
        "event=upload_ingest module=collab status=ok files={} stored={}",
        records.len(),
        records.iter().filter(|record| record.is_stored()).count()
    );
    Ok(records)
}

fn ingest_one<S: DocumentStore>(file: &UploadFile, store: &S, now: Timestamp) -> UploadRecord {
    if !is_allowed_mime(&file.mime) {
        warn!(
            "event=upload_file module=collab status=unsupported size={}",
            file.size()
        );
        return UploadRecord::failed(file, UNSUPPORTED_TYPE_ERROR, now);
    }

    match store.put(&file.name, &file.bytes) {
        Ok(url) => UploadRecord {
            title: file.name.clone(),
            url: Some(url),
            size: file.size(),
            file_type: infer_file_type(&file.name),
            jurisdiction: infer_jurisdiction(&file.name),
            error: None,
            uploaded_at: now,
        },
        Err(err) => {
            warn!(
                "event=upload_file module=collab status=store_failed size={} error={}",
                file.size(),
                err
            );
            UploadRecord::failed(file, STORE_FAILED_ERROR, now)
        }
    }
}
