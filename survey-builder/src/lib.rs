//! # survey-builder
//!
//! Author surveys through a reducer-driven store.
//!
//! A survey is edited exclusively by dispatching [`SurveyAction`]s to a
//! [`SurveyStore`]. The store is handed explicitly to whatever needs it; there
//! is no global survey. A [`BuilderSession`] adds persistence, step
//! navigation and submission on top.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use survey_builder::{BuilderSession, FileStore, QuestionType, Step, SurveyAction};
//!
//! let mut session = BuilderSession::new(FileStore::new("surveys"));
//! session.open(None)?;
//! session.dispatch(SurveyAction::set_title("Team lunch"));
//! session.dispatch(SurveyAction::set_description("Where do we go on Friday?"));
//! session.dispatch(SurveyAction::add_question(QuestionType::SingleChoice, "Cuisine?"));
//! session.navigate(Step::Questions)?;
//! ```
//!
//! ## Crates
//!
//! - `survey-builder-types` - Survey model, actions and the reducer
//! - `survey-builder-store` - Snapshot persistence and export
//! - `survey-builder-html` - Standalone HTML preview

// Re-export the model and the reducer
pub use survey_builder_types::*;

// Re-export persistence
pub use survey_builder_store::{
    FileStore, KeyValueStore, MemoryStore, SnapshotRepository, SnapshotSummary, StoreError,
    export_file_name, export_json, export_to,
};

mod store;
pub use store::SurveyStore;

pub mod session;
pub use session::{BuilderSession, NavigationError, Opened, Step, Submission};

pub mod preview;
pub use preview::TextPreview;
