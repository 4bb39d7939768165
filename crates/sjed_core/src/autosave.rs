//! Debounced autosave for free-text notes.
//!
//! # Responsibility
//! - Coalesce rapid edits into a single deferred write.
//! - Write once the delay has elapsed since the last edit.
//! - Flush the final edit when the editing scope ends.
//!
//! # Invariants
//! - At most one value is pending; each new edit replaces it and restarts
//!   the delay.
//! - Time is passed in by the caller, so behavior is deterministic in tests.

use crate::config::CoreConfig;
use crate::model::{CaseFilePatch, CounselPatch, EntityId, PartyPatch, SettlementOfferPatch};
use crate::persist::BlobStore;
use crate::store::{CaseStore, StoreResult};
use log::{debug, warn};
use std::time::{Duration, Instant};

/// Delay between the last edit and the write.
pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_millis(500);

/// Cancellable delayed value with coalescing.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replaces any pending value and moves the deadline to `now + delay`.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Takes the pending value once its deadline has been reached.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.deadline() {
            Some(deadline) if now >= deadline => self.flush(),
            _ => None,
        }
    }

    /// Drops the pending value without firing it.
    pub fn cancel(&mut self) -> Option<T> {
        self.flush()
    }

    /// Takes the pending value immediately, regardless of deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_AUTOSAVE_DELAY)
    }
}

/// Record whose `notes` field is being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotesTarget {
    File(EntityId),
    Counsel(EntityId),
    Party(EntityId),
    Settlement(EntityId),
}

/// Notes editor session bound to one record.
///
/// Dropping the session flushes the last pending edit.
pub struct NotesAutosave<'s, B: BlobStore> {
    store: &'s mut CaseStore<B>,
    target: NotesTarget,
    debouncer: Debouncer<String>,
    writes: usize,
}

impl<'s, B: BlobStore> NotesAutosave<'s, B> {
    pub fn new(store: &'s mut CaseStore<B>, target: NotesTarget) -> Self {
        Self::with_delay(store, target, DEFAULT_AUTOSAVE_DELAY)
    }

    /// Session using the configured `autosave_delay`.
    pub fn from_config(
        store: &'s mut CaseStore<B>,
        target: NotesTarget,
        config: &CoreConfig,
    ) -> Self {
        Self::with_delay(store, target, config.autosave_delay)
    }

    pub fn with_delay(store: &'s mut CaseStore<B>, target: NotesTarget, delay: Duration) -> Self {
        Self {
            store,
            target,
            debouncer: Debouncer::new(delay),
            writes: 0,
        }
    }

    /// Records an edit; the write happens on a later `tick` or on `finish`.
    pub fn edit(&mut self, text: impl Into<String>, now: Instant) {
        self.debouncer.schedule(text.into(), now);
    }

    /// Writes the pending edit if the delay has elapsed.
    ///
    /// Returns whether a write was attempted and the record existed.
    pub fn tick(&mut self, now: Instant) -> StoreResult<bool> {
        match self.debouncer.poll(now) {
            Some(text) => self.save(text),
            None => Ok(false),
        }
    }

    /// Flushes any pending edit and ends the session.
    pub fn finish(mut self) -> StoreResult<bool> {
        match self.debouncer.flush() {
            Some(text) => self.save(text),
            None => Ok(false),
        }
    }

    /// Drops the pending edit without writing it.
    pub fn discard(&mut self) {
        self.debouncer.cancel();
    }

    pub fn delay(&self) -> Duration {
        self.debouncer.delay()
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Number of writes issued so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn store(&self) -> &CaseStore<B> {
        &*self.store
    }

    fn save(&mut self, text: String) -> StoreResult<bool> {
        self.writes += 1;
        // Blank text clears the field.
        let notes = Some(text).filter(|text| !text.trim().is_empty());
        let saved = match &self.target {
            NotesTarget::File(id) => self.store.update_file(
                id,
                CaseFilePatch {
                    notes: Some(notes),
                    ..CaseFilePatch::default()
                },
            ),
            NotesTarget::Counsel(id) => self.store.update_counsel(
                id,
                CounselPatch {
                    notes: Some(notes),
                    ..CounselPatch::default()
                },
            ),
            NotesTarget::Party(id) => self.store.update_party(
                id,
                PartyPatch {
                    notes: Some(notes),
                    ..PartyPatch::default()
                },
            ),
            NotesTarget::Settlement(id) => self.store.update_settlement_offer(
                id,
                SettlementOfferPatch {
                    notes: Some(notes),
                    ..SettlementOfferPatch::default()
                },
            ),
        }?;
        debug!(
            "event=notes_autosave module=autosave status={} target={:?}",
            if saved { "ok" } else { "not_found" },
            self.target
        );
        Ok(saved)
    }
}

impl<B: BlobStore> Drop for NotesAutosave<'_, B> {
    fn drop(&mut self) {
        if let Some(text) = self.debouncer.flush() {
            if let Err(err) = self.save(text) {
                warn!(
                    "event=notes_autosave module=autosave status=error phase=teardown error={}",
                    err
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Debouncer;
    use std::time::{Duration, Instant};

    #[test]
    fn rapid_schedules_coalesce_and_restart_delay() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        debouncer.schedule("a", start);
        debouncer.schedule("ab", start + Duration::from_millis(300));

        assert_eq!(debouncer.poll(start + Duration::from_millis(600)), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(800)),
            Some("ab")
        );
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn flush_ignores_deadline_and_cancel_drops() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_secs(10));
        debouncer.schedule(1, start);
        assert_eq!(debouncer.flush(), Some(1));
        assert_eq!(debouncer.flush(), None);

        debouncer.schedule(2, start);
        debouncer.cancel();
        assert_eq!(debouncer.poll(start + Duration::from_secs(60)), None);
    }
}
