//! Case management core for the Good Dogg v. MSH judgment enforcement dashboard.
//! This crate owns the case document, its mutation rules and every derived view.

pub mod autosave;
pub mod clock;
pub mod collab;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod persist;
pub mod query;
pub mod seed;
pub mod store;

pub use autosave::{Debouncer, NotesAutosave, NotesTarget, DEFAULT_AUTOSAVE_DELAY};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, CoreConfig};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LoggingError,
};
pub use persist::{
    BlobStore, MemoryBlobStore, PersistError, PersistResult, SqliteBlobStore,
    DEFAULT_STORAGE_KEY,
};
pub use store::{CaseData, CaseStore, LoadSource, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
