//! Email log entries.
//!
//! Entries record correspondence metadata only; bodies are summarized.

use super::validation::require_text;
use super::vocab::{EmailType, Jurisdiction};
use super::{merge, Entity, EntityId, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailLog {
    pub id: EntityId,
    pub subject: String,
    pub summary: String,
    pub from: String,
    pub to: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: EmailType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<Jurisdiction>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub linked_task_ids: Vec<EntityId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub linked_file_ids: Vec<EntityId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub linked_party_ids: Vec<EntityId>,
}

impl Entity for EmailLog {
    const KIND: &'static str = "email";
    const ID_PREFIX: &'static str = "e";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(Self::KIND, "subject", &self.subject)?;
        require_text(Self::KIND, "from", &self.from)?;
        require_text(Self::KIND, "to", &self.to)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmailLog {
    pub subject: String,
    pub summary: String,
    pub from: String,
    pub to: String,
    pub date: NaiveDate,
    pub kind: EmailType,
    pub jurisdiction: Option<Jurisdiction>,
    pub linked_task_ids: Vec<EntityId>,
    pub linked_file_ids: Vec<EntityId>,
    pub linked_party_ids: Vec<EntityId>,
}

impl NewEmailLog {
    pub fn new(
        subject: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        date: NaiveDate,
        kind: EmailType,
    ) -> Self {
        Self {
            subject: subject.into(),
            summary: String::new(),
            from: from.into(),
            to: to.into(),
            date,
            kind,
            jurisdiction: None,
            linked_task_ids: Vec::new(),
            linked_file_ids: Vec::new(),
            linked_party_ids: Vec::new(),
        }
    }

    pub(crate) fn into_email(self, id: EntityId) -> EmailLog {
        EmailLog {
            id,
            subject: self.subject,
            summary: self.summary,
            from: self.from,
            to: self.to,
            date: self.date,
            kind: self.kind,
            jurisdiction: self.jurisdiction,
            linked_task_ids: self.linked_task_ids,
            linked_file_ids: self.linked_file_ids,
            linked_party_ids: self.linked_party_ids,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailLogPatch {
    pub subject: Option<String>,
    pub summary: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub date: Option<NaiveDate>,
    pub kind: Option<EmailType>,
    pub jurisdiction: Option<Option<Jurisdiction>>,
    pub linked_task_ids: Option<Vec<EntityId>>,
    pub linked_file_ids: Option<Vec<EntityId>>,
    pub linked_party_ids: Option<Vec<EntityId>>,
}

impl EmailLogPatch {
    pub(crate) fn apply_to(self, email: &mut EmailLog) {
        merge(&mut email.subject, self.subject);
        merge(&mut email.summary, self.summary);
        merge(&mut email.from, self.from);
        merge(&mut email.to, self.to);
        merge(&mut email.date, self.date);
        merge(&mut email.kind, self.kind);
        merge(&mut email.jurisdiction, self.jurisdiction);
        merge(&mut email.linked_task_ids, self.linked_task_ids);
        merge(&mut email.linked_file_ids, self.linked_file_ids);
        merge(&mut email.linked_party_ids, self.linked_party_ids);
    }
}
