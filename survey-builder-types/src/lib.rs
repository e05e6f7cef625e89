//! Core types for the survey-builder crate.
//!
//! This crate provides the survey model and the pure state transitions over it:
//! - `SurveyState`, `Question`, `QuestionOption` - The survey being authored
//! - `SurveyAction` and `reduce` - Every supported edit and the reducer applying it
//! - `IdGenerator` and `Clock` - Injected sources of identifiers and timestamps

mod ids;
pub use ids::{ID_LENGTH, IdGenerator, OptionId, QuestionId, RandomIds, SequentialIds, SurveyId};

mod clock;
pub use clock::{Clock, FixedClock, SystemClock};

mod question;
pub use question::{Question, QuestionOption, QuestionType};

mod survey_state;
pub use survey_state::SurveyState;

mod action;
pub use action::SurveyAction;

pub mod reducer;
pub use reducer::reduce;

mod error;
pub use error::ParseQuestionTypeError;

pub mod placeholder;
