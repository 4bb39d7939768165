//! Case domain model.
//!
//! # Responsibility
//! - Define the typed records tracked by the case store.
//! - Define the closed vocabularies (jurisdictions, statuses, categories).
//! - Provide create/patch request shapes and record validation.
//!
//! # Invariants
//! - Every record is identified by an `EntityId` unique within its collection.
//! - Cross-record links are plain id lists; they may dangle after deletes.
//! - Patches merge field-by-field and never replace a whole record.

use chrono::{DateTime, Utc};

pub mod case_config;
pub mod case_file;
pub mod counsel;
pub mod email;
pub mod party;
pub mod settlement;
pub mod task;
pub mod validation;
pub mod vocab;

pub use case_config::{CaseConfig, CaseConfigPatch};
pub use case_file::{CaseFile, CaseFilePatch, NewCaseFile};
pub use counsel::{Counsel, CounselPatch, NewCounsel};
pub use email::{EmailLog, EmailLogPatch, NewEmailLog};
pub use party::{NewParty, Party, PartyPatch};
pub use settlement::{NewSettlementOffer, SettlementOffer, SettlementOfferPatch};
pub use task::{NewTask, Task, TaskPatch};
pub use validation::ValidationError;
pub use vocab::{
    CounselStatus, EmailType, FileType, Jurisdiction, PartyRole, Priority, SettlementStatus,
    TaskCategory, TaskStatus,
};

/// Opaque record identifier, unique within one collection.
///
/// Seed fixtures use short ids (`t1`, `f4`); generated ids carry a
/// one-letter kind prefix and a random suffix.
pub type EntityId = String;

/// UTC instant used for `createdAt`/`updatedAt`.
pub type Timestamp = DateTime<Utc>;

/// Behavior shared by every record kept in a store collection.
pub trait Entity: Clone {
    /// Short lowercase kind used in log events (`task`, `file`, ...).
    const KIND: &'static str;
    /// One-letter prefix for generated ids.
    const ID_PREFIX: &'static str;

    fn id(&self) -> &str;

    /// Checks record-level invariants before the record is stored.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Records a mutation at `now`. Untimestamped records ignore it.
    fn touch(&mut self, _now: Timestamp) {}
}

/// Overwrites `slot` when the patch carries a value.
///
/// For nullable fields the patch type is `Option<Option<T>>`, so
/// `Some(None)` clears the field and `None` leaves it untouched.
pub(crate) fn merge<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Returns the next `updatedAt` for a record last stamped at `previous`.
///
/// The result is strictly later than `previous`, even when the clock has not
/// moved (or moved backwards) since the last mutation.
pub(crate) fn advance_stamp(previous: Timestamp, now: Timestamp) -> Timestamp {
    if now > previous {
        now
    } else {
        previous + chrono::Duration::milliseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::{advance_stamp, merge};
    use chrono::{TimeZone, Utc};

    #[test]
    fn merge_only_overwrites_supplied_values() {
        let mut title = "draft".to_string();
        merge(&mut title, None);
        assert_eq!(title, "draft");
        merge(&mut title, Some("final".to_string()));
        assert_eq!(title, "final");

        let mut notes = Some("keep".to_string());
        merge(&mut notes, Some(None));
        assert_eq!(notes, None);
    }

    #[test]
    fn advance_stamp_is_strictly_monotonic() {
        let base = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        assert!(advance_stamp(base, base) > base);
        assert!(advance_stamp(base, base - chrono::Duration::seconds(5)) > base);

        let later = base + chrono::Duration::seconds(5);
        assert_eq!(advance_stamp(base, later), later);
    }
}
