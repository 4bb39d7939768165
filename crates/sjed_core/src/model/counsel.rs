//! Local counsel directory entries.
//!
//! # Invariants
//! - `name`, `firm` are non-empty and `email` is address-shaped.
//! - `tasks_assigned` and `email_log` hold each id at most once when
//!   maintained through the store's compound operations.

use super::validation::{require_email, require_text};
use super::vocab::{CounselStatus, Jurisdiction};
use super::{advance_stamp, merge, Entity, EntityId, Timestamp, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Attorney or firm engaged (or being engaged) in one jurisdiction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Counsel {
    pub id: EntityId,
    pub name: String,
    pub firm: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub state: Jurisdiction,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub status: CounselStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_number: Option<String>,
    #[serde(default)]
    pub tasks_assigned: Vec<EntityId>,
    #[serde(default)]
    pub email_log: Vec<EntityId>,
    pub last_contact: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Counsel {
    /// Appends `task_id` unless already present. Returns whether it was added.
    pub(crate) fn assign_task(&mut self, task_id: &str) -> bool {
        push_unique(&mut self.tasks_assigned, task_id)
    }

    /// Appends `email_id` unless already present. Returns whether it was added.
    pub(crate) fn log_email(&mut self, email_id: &str) -> bool {
        push_unique(&mut self.email_log, email_id)
    }
}

fn push_unique(ids: &mut Vec<EntityId>, id: &str) -> bool {
    if ids.iter().any(|existing| existing == id) {
        return false;
    }
    ids.push(id.to_string());
    true
}

impl Entity for Counsel {
    const KIND: &'static str = "counsel";
    const ID_PREFIX: &'static str = "c";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(Self::KIND, "name", &self.name)?;
        require_text(Self::KIND, "firm", &self.firm)?;
        require_email(&self.email)
    }

    fn touch(&mut self, now: Timestamp) {
        self.updated_at = advance_stamp(self.updated_at, now);
    }
}

/// Create request for counsel.
///
/// New counsel start `Pending`; `last_contact` defaults to the store's today.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCounsel {
    pub name: String,
    pub firm: String,
    pub address: Option<String>,
    pub state: Jurisdiction,
    pub email: String,
    pub phone: Option<String>,
    pub status: CounselStatus,
    pub case_number: Option<String>,
    pub last_contact: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl NewCounsel {
    pub fn new(
        name: impl Into<String>,
        firm: impl Into<String>,
        state: Jurisdiction,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            firm: firm.into(),
            address: None,
            state,
            email: email.into(),
            phone: None,
            status: CounselStatus::Pending,
            case_number: None,
            last_contact: None,
            notes: None,
        }
    }

    pub(crate) fn into_counsel(self, id: EntityId, now: Timestamp, today: NaiveDate) -> Counsel {
        Counsel {
            id,
            name: self.name,
            firm: self.firm,
            address: self.address,
            state: self.state,
            email: self.email,
            phone: self.phone,
            status: self.status,
            case_number: self.case_number,
            tasks_assigned: Vec::new(),
            email_log: Vec::new(),
            last_contact: self.last_contact.unwrap_or(today),
            notes: self.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounselPatch {
    pub name: Option<String>,
    pub firm: Option<String>,
    pub address: Option<Option<String>>,
    pub state: Option<Jurisdiction>,
    pub email: Option<String>,
    pub phone: Option<Option<String>>,
    pub status: Option<CounselStatus>,
    pub case_number: Option<Option<String>>,
    pub tasks_assigned: Option<Vec<EntityId>>,
    pub email_log: Option<Vec<EntityId>>,
    pub last_contact: Option<NaiveDate>,
    pub notes: Option<Option<String>>,
}

impl CounselPatch {
    pub(crate) fn apply_to(self, counsel: &mut Counsel) {
        merge(&mut counsel.name, self.name);
        merge(&mut counsel.firm, self.firm);
        merge(&mut counsel.address, self.address);
        merge(&mut counsel.state, self.state);
        merge(&mut counsel.email, self.email);
        merge(&mut counsel.phone, self.phone);
        merge(&mut counsel.status, self.status);
        merge(&mut counsel.case_number, self.case_number);
        merge(&mut counsel.tasks_assigned, self.tasks_assigned);
        merge(&mut counsel.email_log, self.email_log);
        merge(&mut counsel.last_contact, self.last_contact);
        merge(&mut counsel.notes, self.notes);
    }
}
