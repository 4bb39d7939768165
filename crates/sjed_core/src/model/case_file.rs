//! Case document metadata.
//!
//! # Invariants
//! - `title` is never empty.
//! - Document bytes are never held here; `url`/`storage_hint` point elsewhere.

use super::validation::require_text;
use super::vocab::{FileType, Jurisdiction};
use super::{advance_stamp, merge, Entity, EntityId, Timestamp, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Metadata and free-text notes for one case document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseFile {
    pub id: EntityId,
    pub title: String,
    pub file_type: FileType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<Jurisdiction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_id: Option<EntityId>,
    /// Filing or document date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Where the original lives when there is no URL (drawer, drive folder).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
    /// Extracted full text, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Entity for CaseFile {
    const KIND: &'static str = "file";
    const ID_PREFIX: &'static str = "f";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(Self::KIND, "title", &self.title)
    }

    fn touch(&mut self, now: Timestamp) {
        self.updated_at = advance_stamp(self.updated_at, now);
    }
}

/// Create request for a case file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCaseFile {
    pub title: String,
    pub file_type: FileType,
    pub jurisdiction: Option<Jurisdiction>,
    pub party_id: Option<EntityId>,
    pub date: Option<NaiveDate>,
    pub storage_hint: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub size: Option<u64>,
    pub pages: Option<u32>,
    pub text: Option<String>,
    pub excerpt: Option<String>,
}

impl NewCaseFile {
    pub fn new(title: impl Into<String>, file_type: FileType) -> Self {
        Self {
            title: title.into(),
            file_type,
            jurisdiction: None,
            party_id: None,
            date: None,
            storage_hint: None,
            url: None,
            notes: None,
            size: None,
            pages: None,
            text: None,
            excerpt: None,
        }
    }

    pub fn in_jurisdiction(mut self, jurisdiction: Jurisdiction) -> Self {
        self.jurisdiction = Some(jurisdiction);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub(crate) fn into_case_file(self, id: EntityId, now: Timestamp) -> CaseFile {
        CaseFile {
            id,
            title: self.title,
            file_type: self.file_type,
            jurisdiction: self.jurisdiction,
            party_id: self.party_id,
            date: self.date,
            storage_hint: self.storage_hint,
            url: self.url,
            notes: self.notes,
            size: self.size,
            pages: self.pages,
            text: self.text,
            excerpt: self.excerpt,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for a case file; see [`super::TaskPatch`] for the merge rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseFilePatch {
    pub title: Option<String>,
    pub file_type: Option<FileType>,
    pub jurisdiction: Option<Option<Jurisdiction>>,
    pub party_id: Option<Option<EntityId>>,
    pub date: Option<Option<NaiveDate>>,
    pub storage_hint: Option<Option<String>>,
    pub url: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub size: Option<Option<u64>>,
    pub pages: Option<Option<u32>>,
    pub text: Option<Option<String>>,
    pub excerpt: Option<Option<String>>,
}

impl CaseFilePatch {
    pub fn notes(notes: impl Into<String>) -> Self {
        Self {
            notes: Some(Some(notes.into())),
            ..Self::default()
        }
    }

    pub(crate) fn apply_to(self, file: &mut CaseFile) {
        merge(&mut file.title, self.title);
        merge(&mut file.file_type, self.file_type);
        merge(&mut file.jurisdiction, self.jurisdiction);
        merge(&mut file.party_id, self.party_id);
        merge(&mut file.date, self.date);
        merge(&mut file.storage_hint, self.storage_hint);
        merge(&mut file.url, self.url);
        merge(&mut file.notes, self.notes);
        merge(&mut file.size, self.size);
        merge(&mut file.pages, self.pages);
        merge(&mut file.text, self.text);
        merge(&mut file.excerpt, self.excerpt);
    }
}
