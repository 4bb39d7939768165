//! Party record: plaintiff, defendant, principals and counsel of record.

use super::validation::require_text;
use super::vocab::{Jurisdiction, PartyRole};
use super::{merge, Entity, EntityId, ValidationError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub id: EntityId,
    pub name: String,
    pub role: PartyRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<Jurisdiction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Entity for Party {
    const KIND: &'static str = "party";
    const ID_PREFIX: &'static str = "p";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(Self::KIND, "name", &self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewParty {
    pub name: String,
    pub role: PartyRole,
    pub jurisdiction: Option<Jurisdiction>,
    pub notes: Option<String>,
}

impl NewParty {
    pub fn new(name: impl Into<String>, role: PartyRole) -> Self {
        Self {
            name: name.into(),
            role,
            jurisdiction: None,
            notes: None,
        }
    }

    pub(crate) fn into_party(self, id: EntityId) -> Party {
        Party {
            id,
            name: self.name,
            role: self.role,
            jurisdiction: self.jurisdiction,
            notes: self.notes,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartyPatch {
    pub name: Option<String>,
    pub role: Option<PartyRole>,
    pub jurisdiction: Option<Option<Jurisdiction>>,
    pub notes: Option<Option<String>>,
}

impl PartyPatch {
    pub(crate) fn apply_to(self, party: &mut Party) {
        merge(&mut party.name, self.name);
        merge(&mut party.role, self.role);
        merge(&mut party.jurisdiction, self.jurisdiction);
        merge(&mut party.notes, self.notes);
    }
}
