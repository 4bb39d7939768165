use chrono::{Duration, NaiveDate};
use sjed_core::model::{
    CaseConfigPatch, CaseFilePatch, CounselPatch, EmailType, FileType, Jurisdiction, NewCaseFile,
    NewCounsel, NewEmailLog, NewParty, NewSettlementOffer, NewTask, PartyPatch, PartyRole,
    SettlementStatus, TaskCategory, TaskPatch, TaskStatus, ValidationError,
};
use sjed_core::{CaseStore, Clock, FixedClock, MemoryBlobStore, StoreError};
use std::rc::Rc;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn seeded_store(blobs: &MemoryBlobStore) -> (CaseStore<&MemoryBlobStore>, Rc<FixedClock>) {
    let clock = Rc::new(FixedClock::at_date(2026, 1, 10).unwrap());
    let store = CaseStore::load_with_clock(blobs, Box::new(Rc::clone(&clock)));
    (store, clock)
}

#[test]
fn add_task_stamps_id_timestamps_and_default_status() {
    let blobs = MemoryBlobStore::new();
    let (mut store, clock) = seeded_store(&blobs);
    let writes_before = blobs.write_count();

    let task = store
        .add_task(NewTask::new("Record lien in Brevard", TaskCategory::Execution))
        .unwrap();

    assert!(task.id.starts_with("t-"));
    assert_eq!(task.status, TaskStatus::Backlog);
    assert_eq!(task.created_at, clock.now());
    assert_eq!(task.created_at, task.updated_at);
    assert_eq!(store.snapshot().tasks.last(), Some(&task));
    assert_eq!(blobs.write_count(), writes_before + 1);
}

#[test]
fn generated_ids_are_unique() {
    let blobs = MemoryBlobStore::new();
    let (mut store, _clock) = seeded_store(&blobs);
    let first = store
        .add_party(NewParty::new("Garnishee Bank", PartyRole::Principal))
        .unwrap();
    let second = store
        .add_party(NewParty::new("Garnishee Bank", PartyRole::Principal))
        .unwrap();
    assert_ne!(first.id, second.id);
    assert!(first.id.starts_with("p-"));
}

#[test]
fn blank_title_is_rejected_without_mutation() {
    let blobs = MemoryBlobStore::new();
    let (mut store, _clock) = seeded_store(&blobs);
    let before = store.snapshot().clone();

    let err = store
        .add_task(NewTask::new("   ", TaskCategory::Motion))
        .unwrap_err();
    assert_eq!(
        err,
        StoreError::Validation(ValidationError::EmptyField {
            entity: "task",
            field: "title"
        })
    );
    assert_eq!(store.snapshot(), &before);
}

#[test]
fn update_status_moves_task_between_buckets_and_advances_updated_at() {
    let blobs = MemoryBlobStore::new();
    let (mut store, _clock) = seeded_store(&blobs);
    let before = store.snapshot().task("t4").unwrap().updated_at;

    assert!(store.update_task_status("t4", TaskStatus::Done).unwrap());

    let done: Vec<_> = store
        .tasks_by_status(TaskStatus::Done)
        .iter()
        .map(|task| task.id.clone())
        .collect();
    assert_eq!(done, vec!["t4".to_string()]);
    assert!(store
        .tasks_by_status(TaskStatus::Backlog)
        .iter()
        .all(|task| task.id != "t4"));
    // Clock did not move; the stamp still advances.
    assert!(store.snapshot().task("t4").unwrap().updated_at > before);
}

#[test]
fn done_task_can_be_reopened() {
    let blobs = MemoryBlobStore::new();
    let (mut store, _clock) = seeded_store(&blobs);
    store.update_task_status("t1", TaskStatus::Done).unwrap();
    store.update_task_status("t1", TaskStatus::Backlog).unwrap();
    assert_eq!(store.snapshot().task("t1").unwrap().status, TaskStatus::Backlog);
}

#[test]
fn patch_merges_only_supplied_fields_and_clears_with_some_none() {
    let blobs = MemoryBlobStore::new();
    let (mut store, clock) = seeded_store(&blobs);
    clock.advance(Duration::minutes(5));

    let patch = TaskPatch {
        title: Some("Motion to compel (amended)".to_string()),
        description: Some(None),
        ..TaskPatch::default()
    };
    assert!(store.update_task("t1", patch).unwrap());

    let task = store.snapshot().task("t1").unwrap();
    assert_eq!(task.title, "Motion to compel (amended)");
    assert_eq!(task.description, None);
    assert_eq!(task.jurisdiction, Some(Jurisdiction::Fl));
    assert_eq!(task.linked_file_ids, vec!["f2".to_string()]);
    assert_eq!(task.updated_at, clock.now());
}

#[test]
fn updates_on_unknown_ids_leave_collections_unchanged() {
    let blobs = MemoryBlobStore::new();
    let (mut store, _clock) = seeded_store(&blobs);
    let before = store.snapshot().clone();
    let writes_before = blobs.write_count();

    assert!(!store.update_task("t-missing", TaskPatch::status(TaskStatus::Done)).unwrap());
    assert!(!store.update_file("f-missing", CaseFilePatch::notes("x")).unwrap());
    assert!(!store.update_party("p-missing", PartyPatch::default()).unwrap());
    assert!(!store.update_counsel("c-missing", CounselPatch::default()).unwrap());
    assert!(!store.accept_offer("s-missing").unwrap());
    assert!(!store.delete_email("e-missing"));

    assert_eq!(store.snapshot(), &before);
    assert_eq!(blobs.write_count(), writes_before);
}

#[test]
fn invalid_patch_keeps_previous_record() {
    let blobs = MemoryBlobStore::new();
    let (mut store, _clock) = seeded_store(&blobs);
    let before = store.snapshot().counsel_by_id("c1").unwrap().clone();

    let err = store
        .update_counsel(
            "c1",
            CounselPatch {
                email: Some("not-an-address".to_string()),
                ..CounselPatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(ValidationError::InvalidEmail(_))
    ));
    assert_eq!(store.snapshot().counsel_by_id("c1"), Some(&before));
}

#[test]
fn deleting_linked_file_leaves_dangling_ids() {
    let blobs = MemoryBlobStore::new();
    let (mut store, _clock) = seeded_store(&blobs);
    let task_before = store.snapshot().task("t2").unwrap().clone();

    assert!(store.delete_file("f4"));
    assert!(!store.delete_file("f4"));

    assert!(store.snapshot().file("f4").is_none());
    assert_eq!(store.snapshot().task("t2"), Some(&task_before));
    assert!(store
        .snapshot()
        .email("e1")
        .unwrap()
        .linked_file_ids
        .contains(&"f4".to_string()));
}

#[test]
fn assigning_twice_keeps_single_entry() {
    let blobs = MemoryBlobStore::new();
    let (mut store, _clock) = seeded_store(&blobs);
    let counsel = store
        .add_counsel(NewCounsel::new(
            "Jane Roe",
            "Roe & Partners",
            Jurisdiction::Tn,
            "jane@roe.law",
        ))
        .unwrap();
    assert_eq!(counsel.last_contact, date(2026, 1, 10));

    let writes_before = blobs.write_count();
    assert!(store.assign_task_to_counsel("t3", &counsel.id));
    assert!(store.assign_task_to_counsel("t3", &counsel.id));
    assert_eq!(blobs.write_count(), writes_before + 2);

    let stored = store.snapshot().counsel_by_id(&counsel.id).unwrap();
    assert_eq!(stored.tasks_assigned, vec!["t3".to_string()]);
    assert!(stored.updated_at > counsel.updated_at);
    assert_eq!(
        store.snapshot().task("t3").unwrap().assigned_counsel_id.as_deref(),
        Some(counsel.id.as_str())
    );
}

#[test]
fn assignment_with_unknown_id_changes_nothing() {
    let blobs = MemoryBlobStore::new();
    let (mut store, _clock) = seeded_store(&blobs);
    let before = store.snapshot().clone();

    assert!(!store.assign_task_to_counsel("t3", "c-missing"));
    assert!(!store.assign_task_to_counsel("t-missing", "c1"));
    assert_eq!(store.snapshot(), &before);
}

#[test]
fn recording_counsel_email_dedups_and_moves_last_contact_forward() {
    let blobs = MemoryBlobStore::new();
    let (mut store, _clock) = seeded_store(&blobs);
    let email = store
        .add_email(NewEmailLog::new(
            "Lien recorded",
            "jporteous@uslegalteam.com",
            "client@gooddogg.com",
            date(2026, 1, 9),
            EmailType::Client,
        ))
        .unwrap();

    assert!(store.record_counsel_email("c1", &email.id));
    assert!(store.record_counsel_email("c1", &email.id));
    assert!(store.record_counsel_email("c1", "e1"));

    let counsel = store.snapshot().counsel_by_id("c1").unwrap();
    assert_eq!(counsel.email_log.len(), 3);
    assert_eq!(counsel.last_contact, date(2026, 1, 9));
    assert!(!store.record_counsel_email("c1", "e-missing"));
}

#[test]
fn settlement_quick_actions_set_status_and_counter() {
    let blobs = MemoryBlobStore::new();
    let (mut store, _clock) = seeded_store(&blobs);
    let offer = store
        .add_settlement_offer(NewSettlementOffer::new(date(2026, 1, 5), "MSH", 900_000.0))
        .unwrap();
    assert_eq!(offer.status, SettlementStatus::Review);

    assert!(store.counter_offer(&offer.id, 2_000_000.0).unwrap());
    let countered = store.snapshot().settlement(&offer.id).unwrap();
    assert_eq!(countered.status, SettlementStatus::Countered);
    assert_eq!(countered.counter_amount, Some(2_000_000.0));

    assert!(store.reject_offer(&offer.id).unwrap());
    assert!(store.accept_offer(&offer.id).unwrap());
    assert_eq!(
        store.snapshot().settlement(&offer.id).unwrap().status,
        SettlementStatus::Accepted
    );

    assert!(store.counter_offer(&offer.id, -1.0).is_err());
    assert!(store
        .add_settlement_offer(NewSettlementOffer::new(date(2026, 1, 5), "MSH", f64::NAN))
        .is_err());
}

#[test]
fn case_config_updates_partially_and_validates() {
    let blobs = MemoryBlobStore::new();
    let (mut store, _clock) = seeded_store(&blobs);

    store
        .update_case_config(CaseConfigPatch {
            floor_amount: Some(1_500_000.0),
            ..CaseConfigPatch::default()
        })
        .unwrap();
    assert_eq!(store.case_config().floor_amount, 1_500_000.0);
    assert_eq!(store.case_config().interest_rate, 10.0);

    let err = store
        .update_case_config(CaseConfigPatch {
            interest_rate: Some(-2.0),
            ..CaseConfigPatch::default()
        })
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(ValidationError::InvalidAmount { .. })
    ));
    assert_eq!(store.case_config().interest_rate, 10.0);
}

#[test]
fn files_parties_and_preferences_round_out_the_api() {
    let blobs = MemoryBlobStore::new();
    let (mut store, _clock) = seeded_store(&blobs);

    let file = store
        .add_file(
            NewCaseFile::new("TN-Domestication-Petition.pdf", FileType::Notice)
                .in_jurisdiction(Jurisdiction::Tn),
        )
        .unwrap();
    assert!(file.id.starts_with("f-"));
    assert!(store.update_file(&file.id, CaseFilePatch::notes("filed")).unwrap());
    assert_eq!(
        store.snapshot().file(&file.id).unwrap().notes.as_deref(),
        Some("filed")
    );

    assert!(store.delete_party("p4"));
    assert!(store.snapshot().party("p4").is_none());
    assert!(store.delete_task("t8"));
    assert!(store.delete_counsel("c1"));
    assert_eq!(
        store.snapshot().task("t1").unwrap().assigned_counsel_id.as_deref(),
        Some("c1")
    );

    assert!(store.toggle_dark_mode());
    assert!(store.snapshot().dark_mode);
    store.set_dark_mode(false);
    assert!(!store.snapshot().dark_mode);
}
