//! Boundary collaborators around the case store.
//!
//! # Responsibility
//! - Turn uploaded documents into case file records.
//! - Validate and simulate outgoing email, with a `mailto:` fallback.
//! - Export tasks, counsel and settlement offers as CSV.
//!
//! # Invariants
//! - Collaborators never mutate the store; callers feed their output into
//!   the store's `add_*` operations.
//! - Per-item failures degrade that item only (uploads) or surface as a
//!   typed error (email, export).

pub mod email;
pub mod export;
pub mod upload;

pub use email::{
    mailto_link, send_email, EmailDraft, EmailError, EmailSettings, SendRequest, SentEmail,
};
pub use export::{
    export_counsel_csv, export_settlements_csv, export_tasks_csv, ExportError,
};
pub use upload::{
    infer_file_type, infer_jurisdiction, ingest_uploads, release_document,
    DirectoryDocumentStore, DocumentStore, UploadError, UploadFile, UploadRecord,
};
