//! Persistence for survey-builder.
//!
//! Surveys are stored as JSON snapshots in a string key-value store, one
//! entry per survey under `survey-<id>`:
//! - `KeyValueStore` - The storage seam, with `MemoryStore` and `FileStore`
//! - `SnapshotRepository` - Save, load, remove and list survey snapshots
//! - `export_to` - Write a survey as a downloadable JSON document

mod error;
pub use error::StoreError;

mod kv;
pub use kv::{KeyValueStore, MemoryStore};

mod file;
pub use file::FileStore;

mod repository;
pub use repository::{KEY_PREFIX, SnapshotRepository, SnapshotSummary, snapshot_key};

mod export;
pub use export::{export_file_name, export_json, export_to};
