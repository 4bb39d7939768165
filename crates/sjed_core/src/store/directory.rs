//! Counsel directory mutations.

use super::{new_id, CaseStore, StoreResult};
use crate::model::{Counsel, CounselPatch, Entity, NewCounsel};
use crate::persist::BlobStore;
use log::{info, warn};

impl<B: BlobStore> CaseStore<B> {
    /// Adds counsel. `lastContact` defaults to today when not supplied.
    pub fn add_counsel(&mut self, counsel: NewCounsel) -> StoreResult<Counsel> {
        let now = self.clock.now();
        let today = self.clock.today();
        self.insert(counsel.into_counsel(new_id::<Counsel>(), now, today))
    }

    pub fn update_counsel(&mut self, id: &str, patch: CounselPatch) -> StoreResult<bool> {
        self.patch::<Counsel>(id, |counsel| patch.apply_to(counsel))
    }

    /// Removes counsel. Tasks keep their `assignedCounselId`.
    pub fn delete_counsel(&mut self, id: &str) -> bool {
        self.remove::<Counsel>(id)
    }

    /// Links a logged email to counsel.
    ///
    /// Appends `email_id` to `emailLog` unless present and moves
    /// `lastContact` forward to the email's date when that is later.
    /// Returns `false` and changes nothing when either id is unknown.
    pub fn record_counsel_email(&mut self, counsel_id: &str, email_id: &str) -> bool {
        let now = self.clock.now();
        let Some(email_date) = self.data.email(email_id).map(|email| email.date) else {
            warn!(
                "event=counsel_email module=store status=not_found email_id={}",
                email_id
            );
            return false;
        };
        let Some(counsel) = self
            .data
            .counsel
            .iter_mut()
            .find(|counsel| counsel.id == counsel_id)
        else {
            warn!(
                "event=counsel_email module=store status=not_found counsel_id={}",
                counsel_id
            );
            return false;
        };

        let appended = counsel.log_email(email_id);
        if email_date > counsel.last_contact {
            counsel.last_contact = email_date;
        }
        counsel.touch(now);

        info!(
            "event=counsel_email module=store status=ok counsel_id={} email_id={} appended={}",
            counsel_id, email_id, appended
        );
        self.write_through();
        true
    }
}
