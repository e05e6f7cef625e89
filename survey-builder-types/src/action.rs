use serde::{Deserialize, Serialize};

use crate::{OptionId, QuestionId, QuestionType, SurveyId, SurveyState};

/// Every state change the survey reducer understands.
///
/// Serialized as `{"type": "addQuestion", "payload": {...}}`, so a recorded
/// list of actions can be replayed against a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum SurveyAction {
    /// Merge the provided metadata fields; omitted fields stay as they are.
    UpdateMetadata {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },

    /// Append a new question.
    AddQuestion {
        #[serde(rename = "type")]
        kind: QuestionType,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },

    DeleteQuestion {
        question_id: QuestionId,
    },

    /// Replace the text and optionally switch the question type.
    UpdateQuestion {
        question_id: QuestionId,
        text: String,
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        kind: Option<QuestionType>,
    },

    /// Insert a copy right after the original, with fresh ids.
    DuplicateQuestion {
        question_id: QuestionId,
    },

    ReorderQuestions {
        from_index: usize,
        to_index: usize,
    },

    AddOption {
        question_id: QuestionId,
    },

    UpdateOption {
        question_id: QuestionId,
        option_id: OptionId,
        text: String,
    },

    DeleteOption {
        question_id: QuestionId,
        option_id: OptionId,
    },

    ReorderOptions {
        question_id: QuestionId,
        from_index: usize,
        to_index: usize,
    },

    /// Start over with an empty survey and a generated id.
    Reset,

    /// Start over with an empty survey using the given id.
    ResetWithId {
        id: SurveyId,
    },

    /// Replace the whole state with a snapshot.
    RestoreSurvey(SurveyState),
}

impl SurveyAction {
    /// The action's wire name, e.g. `addQuestion`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::UpdateMetadata { .. } => "updateMetadata",
            Self::AddQuestion { .. } => "addQuestion",
            Self::DeleteQuestion { .. } => "deleteQuestion",
            Self::UpdateQuestion { .. } => "updateQuestion",
            Self::DuplicateQuestion { .. } => "duplicateQuestion",
            Self::ReorderQuestions { .. } => "reorderQuestions",
            Self::AddOption { .. } => "addOption",
            Self::UpdateOption { .. } => "updateOption",
            Self::DeleteOption { .. } => "deleteOption",
            Self::ReorderOptions { .. } => "reorderOptions",
            Self::Reset => "reset",
            Self::ResetWithId { .. } => "resetWithId",
            Self::RestoreSurvey(_) => "restoreSurvey",
        }
    }

    /// Set the title only.
    pub fn set_title(title: impl Into<String>) -> Self {
        Self::UpdateMetadata {
            title: Some(title.into()),
            description: None,
        }
    }

    /// Set the description only.
    pub fn set_description(description: impl Into<String>) -> Self {
        Self::UpdateMetadata {
            title: None,
            description: Some(description.into()),
        }
    }

    pub fn add_question(kind: QuestionType, text: impl Into<String>) -> Self {
        Self::AddQuestion {
            kind,
            text: Some(text.into()),
        }
    }

    pub fn delete_question(question_id: impl Into<QuestionId>) -> Self {
        Self::DeleteQuestion {
            question_id: question_id.into(),
        }
    }

    pub fn duplicate_question(question_id: impl Into<QuestionId>) -> Self {
        Self::DuplicateQuestion {
            question_id: question_id.into(),
        }
    }

    pub fn add_option(question_id: impl Into<QuestionId>) -> Self {
        Self::AddOption {
            question_id: question_id.into(),
        }
    }

    pub fn update_option(
        question_id: impl Into<QuestionId>,
        option_id: impl Into<OptionId>,
        text: impl Into<String>,
    ) -> Self {
        Self::UpdateOption {
            question_id: question_id.into(),
            option_id: option_id.into(),
            text: text.into(),
        }
    }

    pub fn delete_option(
        question_id: impl Into<QuestionId>,
        option_id: impl Into<OptionId>,
    ) -> Self {
        Self::DeleteOption {
            question_id: question_id.into(),
            option_id: option_id.into(),
        }
    }

    pub fn reorder_options(
        question_id: impl Into<QuestionId>,
        from_index: usize,
        to_index: usize,
    ) -> Self {
        Self::ReorderOptions {
            question_id: question_id.into(),
            from_index,
            to_index,
        }
    }
}
