use sjed_core::model::{NewSettlementOffer, PartyPatch};
use sjed_core::{CaseStore, CoreConfig, FixedClock, MemoryBlobStore, NotesAutosave, NotesTarget};
use std::time::{Duration, Instant};

fn open_store(blobs: &MemoryBlobStore) -> CaseStore<&MemoryBlobStore> {
    CaseStore::load_with_clock(blobs, Box::new(FixedClock::at_date(2026, 1, 10).unwrap()))
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[test]
fn rapid_edits_coalesce_into_one_write() {
    let blobs = MemoryBlobStore::new();
    let mut store = open_store(&blobs);
    let writes_before = blobs.write_count();
    let start = Instant::now();

    let mut session = NotesAutosave::new(&mut store, NotesTarget::File("f2".to_string()));
    session.edit("C", start);
    session.edit("Co", start + ms(100));
    session.edit("Court order", start + ms(200));

    assert!(!session.tick(start + ms(600)).unwrap());
    assert!(session.tick(start + ms(700)).unwrap());
    assert!(!session.tick(start + ms(2_000)).unwrap());
    assert_eq!(session.writes(), 1);
    assert!(session.finish().is_ok());

    assert_eq!(blobs.write_count(), writes_before + 1);
    assert_eq!(
        store.snapshot().file("f2").unwrap().notes.as_deref(),
        Some("Court order")
    );
}

#[test]
fn drop_flushes_the_final_edit() {
    let blobs = MemoryBlobStore::new();
    let mut store = open_store(&blobs);
    let start = Instant::now();
    {
        let mut session = NotesAutosave::with_delay(
            &mut store,
            NotesTarget::Counsel("c1".to_string()),
            ms(10_000),
        );
        session.edit("Prefers email", start);
        assert!(session.is_pending());
    }
    assert_eq!(
        store.snapshot().counsel_by_id("c1").unwrap().notes.as_deref(),
        Some("Prefers email")
    );
}

#[test]
fn finish_writes_pending_and_discard_drops_it() {
    let blobs = MemoryBlobStore::new();
    let mut store = open_store(&blobs);
    let offer = store
        .add_settlement_offer(NewSettlementOffer::new(
            chrono::NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            "MSH",
            750_000.0,
        ))
        .unwrap();
    let start = Instant::now();

    let mut session = NotesAutosave::new(&mut store, NotesTarget::Settlement(offer.id.clone()));
    session.edit("Lowball", start);
    assert!(session.finish().unwrap());
    assert_eq!(
        store.snapshot().settlement(&offer.id).unwrap().notes.as_deref(),
        Some("Lowball")
    );

    let mut session = NotesAutosave::new(&mut store, NotesTarget::Party("p2".to_string()));
    session.edit("never saved", start);
    session.discard();
    drop(session);
    assert_ne!(
        store.snapshot().party("p2").unwrap().notes.as_deref(),
        Some("never saved")
    );
}

#[test]
fn blank_notes_clear_the_field() {
    let blobs = MemoryBlobStore::new();
    let mut store = open_store(&blobs);
    store
        .update_party(
            "p3",
            PartyPatch {
                notes: Some(Some("temp".to_string())),
                ..PartyPatch::default()
            },
        )
        .unwrap();

    let mut session = NotesAutosave::new(&mut store, NotesTarget::Party("p3".to_string()));
    session.edit("   ", Instant::now());
    assert!(session.finish().unwrap());
    assert_eq!(store.snapshot().party("p3").unwrap().notes, None);
}

#[test]
fn unknown_target_is_a_quiet_no_op() {
    let blobs = MemoryBlobStore::new();
    let mut store = open_store(&blobs);
    let before = store.snapshot().clone();

    let mut session = NotesAutosave::new(&mut store, NotesTarget::File("f-missing".to_string()));
    session.edit("orphan", Instant::now());
    assert!(!session.finish().unwrap());
    assert_eq!(store.snapshot(), &before);
}

#[test]
fn configured_delay_controls_when_the_write_fires() {
    let config = CoreConfig::from_lookup(|var| {
        (var == "SJED_AUTOSAVE_MS").then(|| "250".to_string())
    })
    .unwrap();
    let blobs = MemoryBlobStore::new();
    let mut store = open_store(&blobs);
    let writes_before = blobs.write_count();
    let start = Instant::now();

    let mut session =
        NotesAutosave::from_config(&mut store, NotesTarget::Party("p3".to_string()), &config);
    assert_eq!(session.delay(), ms(250));
    session.edit("Indiana principal served", start);

    assert!(!session.tick(start + ms(249)).unwrap());
    assert!(session.is_pending());
    assert!(session.tick(start + ms(250)).unwrap());
    assert!(!session.is_pending());
    drop(session);

    assert_eq!(blobs.write_count(), writes_before + 1);
    assert_eq!(
        store.snapshot().party("p3").unwrap().notes.as_deref(),
        Some("Indiana principal served")
    );
}
