//! The persisted case document.

use crate::model::{
    CaseConfig, CaseFile, Counsel, EmailLog, Entity, Party, SettlementOffer, Task,
};
use crate::seed::seed_case_config;
use serde::{Deserialize, Serialize};

/// Everything the dashboard persists under one storage key.
///
/// `initialized` records that first-run seeding happened; it stays `true`
/// even if every collection is later emptied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseData {
    #[serde(default)]
    pub parties: Vec<Party>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub files: Vec<CaseFile>,
    #[serde(default)]
    pub emails: Vec<EmailLog>,
    #[serde(default)]
    pub counsel: Vec<Counsel>,
    #[serde(default)]
    pub settlements: Vec<SettlementOffer>,
    #[serde(default = "seed_case_config")]
    pub case_config: CaseConfig,
    #[serde(default)]
    pub initialized: bool,
    #[serde(default)]
    pub dark_mode: bool,
}

impl CaseData {
    /// Empty, uninitialized document carrying the default case configuration.
    pub fn empty() -> Self {
        Self {
            parties: Vec::new(),
            tasks: Vec::new(),
            files: Vec::new(),
            emails: Vec::new(),
            counsel: Vec::new(),
            settlements: Vec::new(),
            case_config: seed_case_config(),
            initialized: false,
            dark_mode: false,
        }
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        find(&self.tasks, id)
    }

    pub fn file(&self, id: &str) -> Option<&CaseFile> {
        find(&self.files, id)
    }

    pub fn party(&self, id: &str) -> Option<&Party> {
        find(&self.parties, id)
    }

    pub fn email(&self, id: &str) -> Option<&EmailLog> {
        find(&self.emails, id)
    }

    pub fn counsel_by_id(&self, id: &str) -> Option<&Counsel> {
        find(&self.counsel, id)
    }

    pub fn settlement(&self, id: &str) -> Option<&SettlementOffer> {
        find(&self.settlements, id)
    }
}

fn find<'a, T: Entity>(items: &'a [T], id: &str) -> Option<&'a T> {
    items.iter().find(|item| item.id() == id)
}

/// Maps a record type to its collection inside [`CaseData`].
pub(crate) trait Stored: Entity {
    fn collection(data: &CaseData) -> &Vec<Self>;
    fn collection_mut(data: &mut CaseData) -> &mut Vec<Self>;
}

macro_rules! stored {
    ($ty:ty, $field:ident) => {
        impl Stored for $ty {
            fn collection(data: &CaseData) -> &Vec<Self> {
                &data.$field
            }

            fn collection_mut(data: &mut CaseData) -> &mut Vec<Self> {
                &mut data.$field
            }
        }
    };
}

stored!(Party, parties);
stored!(Task, tasks);
stored!(CaseFile, files);
stored!(EmailLog, emails);
stored!(Counsel, counsel);
stored!(SettlementOffer, settlements);
