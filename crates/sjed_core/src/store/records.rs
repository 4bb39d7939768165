//! Party, case file and email log mutations.

use super::{new_id, CaseStore, StoreResult};
use crate::model::{
    CaseFile, CaseFilePatch, EmailLog, EmailLogPatch, NewCaseFile, NewEmailLog, NewParty, Party,
    PartyPatch,
};
use crate::persist::BlobStore;

impl<B: BlobStore> CaseStore<B> {
    pub fn add_party(&mut self, party: NewParty) -> StoreResult<Party> {
        self.insert(party.into_party(new_id::<Party>()))
    }

    pub fn update_party(&mut self, id: &str, patch: PartyPatch) -> StoreResult<bool> {
        self.patch::<Party>(id, |party| patch.apply_to(party))
    }

    /// Removes a party. Tasks and emails keep any links to it.
    pub fn delete_party(&mut self, id: &str) -> bool {
        self.remove::<Party>(id)
    }

    /// Registers file metadata. No document bytes are stored.
    pub fn add_file(&mut self, file: NewCaseFile) -> StoreResult<CaseFile> {
        let now = self.clock.now();
        self.insert(file.into_case_file(new_id::<CaseFile>(), now))
    }

    pub fn update_file(&mut self, id: &str, patch: CaseFilePatch) -> StoreResult<bool> {
        self.patch::<CaseFile>(id, |file| patch.apply_to(file))
    }

    /// Removes a file. `linkedFileIds` on tasks and emails are left dangling.
    pub fn delete_file(&mut self, id: &str) -> bool {
        self.remove::<CaseFile>(id)
    }

    pub fn add_email(&mut self, email: NewEmailLog) -> StoreResult<EmailLog> {
        self.insert(email.into_email(new_id::<EmailLog>()))
    }

    pub fn update_email(&mut self, id: &str, patch: EmailLogPatch) -> StoreResult<bool> {
        self.patch::<EmailLog>(id, |email| patch.apply_to(email))
    }

    pub fn delete_email(&mut self, id: &str) -> bool {
        self.remove::<EmailLog>(id)
    }
}
