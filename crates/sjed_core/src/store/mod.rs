//! Case entity store and mutation API.
//!
//! # Responsibility
//! - Own the in-memory case document and hand out read-only snapshots.
//! - Apply create/patch/delete mutations, stamping ids and timestamps.
//! - Write the whole document through to a [`BlobStore`] after each mutation.
//! - Seed the document exactly once on first run.
//!
//! # Invariants
//! - Callers never get `&mut` access to the document; all writes go through
//!   `CaseStore` methods.
//! - Updates and deletes on unknown ids are silent no-ops (`Ok(false)` /
//!   `false`), logged at `warn`, and leave every collection untouched.
//! - Deletes never cascade into other records' linked-id lists.
//! - Write-through failures never propagate; the store keeps its in-memory
//!   state and reports `is_dirty() == true` until a write succeeds.

mod data;
mod directory;
mod records;
mod settlements;
mod tasks;

pub use data::CaseData;
pub(crate) use data::Stored;

use crate::clock::{Clock, SystemClock};
use crate::model::{CaseConfig, Entity, EntityId, ValidationError};
use crate::persist::{
    decode_case_data, encode_case_data, BlobStore, PersistError, DEFAULT_STORAGE_KEY,
};
use crate::seed::seed_case_data;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error returned by store mutations.
///
/// Only boundary validation surfaces as an error; persistence problems are
/// absorbed (see module invariants).
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    Validation(ValidationError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// How the document was obtained when the store was loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// An initialized document was read from the backend.
    Persisted,
    /// Nothing was stored yet; seed data was written.
    SeededFresh,
    /// A stored document existed but was never initialized; seed data replaced it.
    SeededUninitialized,
    /// The stored blob could not be read or decoded; seed data replaced it.
    SeededAfterFailure,
}

/// Case entity store bound to a persistence backend.
pub struct CaseStore<B: BlobStore> {
    backend: B,
    clock: Box<dyn Clock>,
    key: String,
    data: CaseData,
    load_source: LoadSource,
    dirty: bool,
}

impl<B: BlobStore> CaseStore<B> {
    /// Loads the store from `backend` under the default key using wall-clock time.
    pub fn load(backend: B) -> Self {
        Self::open(backend, Box::new(SystemClock), DEFAULT_STORAGE_KEY)
    }

    /// Loads the store under the default key with an explicit clock.
    pub fn load_with_clock(backend: B, clock: Box<dyn Clock>) -> Self {
        Self::open(backend, clock, DEFAULT_STORAGE_KEY)
    }

    /// Loads the store under `key`.
    ///
    /// Never fails: a missing, unreadable, corrupt or uninitialized blob is
    /// replaced with seed data, which is written through once.
    pub fn open(backend: B, clock: Box<dyn Clock>, key: impl Into<String>) -> Self {
        let mut store = Self {
            backend,
            clock,
            key: key.into(),
            data: CaseData::empty(),
            load_source: LoadSource::SeededFresh,
            dirty: false,
        };
        store.reload();
        store
    }

    /// Re-reads the document from the backend, seeding when necessary.
    ///
    /// Unsaved in-memory state is discarded.
    pub fn reload(&mut self) -> LoadSource {
        let source = match self.backend.read_blob(&self.key) {
            Ok(Some(raw)) => match decode_case_data(&raw) {
                Ok(data) if data.initialized => {
                    self.data = data;
                    LoadSource::Persisted
                }
                Ok(_) => LoadSource::SeededUninitialized,
                Err(err) => {
                    warn!(
                        "event=store_load module=store status=corrupt key={} error={}",
                        self.key, err
                    );
                    LoadSource::SeededAfterFailure
                }
            },
            Ok(None) => LoadSource::SeededFresh,
            Err(err) => {
                error!(
                    "event=store_load module=store status=error key={} error={}",
                    self.key, err
                );
                LoadSource::SeededAfterFailure
            }
        };

        if source != LoadSource::Persisted {
            self.data = CaseData::empty();
            self.ensure_seeded();
        } else {
            self.dirty = false;
        }

        info!(
            "event=store_load module=store status=ok key={} source={:?} tasks={} files={}",
            self.key,
            source,
            self.data.tasks.len(),
            self.data.files.len()
        );
        self.load_source = source;
        source
    }

    /// Populates the seed dataset if the document was never initialized.
    ///
    /// Returns `false` without side effects when already initialized.
    pub fn ensure_seeded(&mut self) -> bool {
        if self.data.initialized {
            return false;
        }
        let dark_mode = self.data.dark_mode;
        self.data = seed_case_data(self.clock.now());
        self.data.dark_mode = dark_mode;
        info!(
            "event=store_seed module=store status=ok key={} tasks={}",
            self.key,
            self.data.tasks.len()
        );
        self.write_through();
        true
    }

    /// Writes the final state and returns the backend.
    pub fn dispose(mut self) -> B {
        self.write_through();
        info!(
            "event=store_dispose module=store status={} key={}",
            if self.dirty { "dirty" } else { "ok" },
            self.key
        );
        self.backend
    }

    /// Read-only view of the current document.
    pub fn snapshot(&self) -> &CaseData {
        &self.data
    }

    pub fn case_config(&self) -> &CaseConfig {
        &self.data.case_config
    }

    pub fn load_source(&self) -> LoadSource {
        self.load_source
    }

    /// Whether the last write-through failed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Persists the whole document; failures are logged and mark the store dirty.
    pub(crate) fn write_through(&mut self) {
        let result = encode_case_data(&self.data)
            .and_then(|encoded| self.backend.write_blob(&self.key, &encoded));
        match result {
            Ok(()) => self.dirty = false,
            Err(err) => {
                self.dirty = true;
                log_write_failure(&self.key, &err);
            }
        }
    }

    pub(crate) fn insert<T: Stored>(&mut self, record: T) -> StoreResult<T> {
        if let Err(err) = record.validate() {
            warn!(
                "event={}_add module=store status=rejected error={}",
                T::KIND,
                err
            );
            return Err(err.into());
        }
        T::collection_mut(&mut self.data).push(record.clone());
        info!(
            "event={}_add module=store status=ok id={} count={}",
            T::KIND,
            record.id(),
            T::collection(&self.data).len()
        );
        self.write_through();
        Ok(record)
    }

    /// Applies `change` to a copy of record `id`, stamps and validates it,
    /// then swaps it in. Unknown ids return `Ok(false)`.
    pub(crate) fn patch<T: Stored>(
        &mut self,
        id: &str,
        change: impl FnOnce(&mut T),
    ) -> StoreResult<bool> {
        let now = self.clock.now();
        let items = T::collection_mut(&mut self.data);
        let Some(index) = items.iter().position(|item| item.id() == id) else {
            warn!(
                "event={}_update module=store status=not_found id={}",
                T::KIND,
                id
            );
            return Ok(false);
        };

        let mut next = items[index].clone();
        change(&mut next);
        next.touch(now);
        if let Err(err) = next.validate() {
            warn!(
                "event={}_update module=store status=rejected id={} error={}",
                T::KIND,
                id,
                err
            );
            return Err(err.into());
        }
        items[index] = next;

        info!("event={}_update module=store status=ok id={}", T::KIND, id);
        self.write_through();
        Ok(true)
    }

    pub(crate) fn remove<T: Stored>(&mut self, id: &str) -> bool {
        let items = T::collection_mut(&mut self.data);
        let before = items.len();
        items.retain(|item| item.id() != id);
        if items.len() == before {
            warn!(
                "event={}_delete module=store status=not_found id={}",
                T::KIND,
                id
            );
            return false;
        }
        info!("event={}_delete module=store status=ok id={}", T::KIND, id);
        self.write_through();
        true
    }
}

/// Generates a fresh id for a record of type `T`.
pub(crate) fn new_id<T: Entity>() -> EntityId {
    format!("{}-{}", T::ID_PREFIX, Uuid::new_v4().simple())
}

fn log_write_failure(key: &str, err: &PersistError) {
    error!(
        "event=store_persist module=store status=error key={} error={}",
        key, err
    );
}
