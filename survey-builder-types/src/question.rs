use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{IdGenerator, OptionId, ParseQuestionTypeError, QuestionId};

/// The kind of question, determining how it is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    /// Pick exactly one of the options.
    SingleChoice,

    /// Pick any number of the options.
    MultipleChoice,

    /// Free-text answer, no options.
    TextInput,
}

impl QuestionType {
    /// All question types, in display order.
    pub const ALL: [QuestionType; 3] = [
        QuestionType::SingleChoice,
        QuestionType::MultipleChoice,
        QuestionType::TextInput,
    ];

    /// Check if answers are picked from a list of options.
    pub fn is_choice(self) -> bool {
        matches!(self, Self::SingleChoice | Self::MultipleChoice)
    }

    /// The wire name, e.g. `SINGLE_CHOICE`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SingleChoice => "SINGLE_CHOICE",
            Self::MultipleChoice => "MULTIPLE_CHOICE",
            Self::TextInput => "TEXT_INPUT",
        }
    }

    /// Human-readable label, e.g. `Single Choice`.
    pub fn label(self) -> &'static str {
        match self {
            Self::SingleChoice => "Single Choice",
            Self::MultipleChoice => "Multiple Choice",
            Self::TextInput => "Text Input",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = ParseQuestionTypeError;

    /// Accepts the wire name in any case, with `-` or `_` separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ParseQuestionTypeError(s.to_string()))
    }
}

/// A selectable answer belonging to a choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    id: OptionId,
    text: String,
}

impl QuestionOption {
    /// Create an option with the given id and label.
    pub fn new(id: impl Into<OptionId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    /// Create an empty option with a fresh id.
    pub fn blank(ids: &mut impl IdGenerator) -> Self {
        Self::new(ids.next_id(), "")
    }

    pub fn id(&self) -> &OptionId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Copy of this option under a fresh id.
    pub(crate) fn copy_with_new_id(&self, ids: &mut impl IdGenerator) -> Self {
        Self::new(ids.next_id(), self.text.clone())
    }
}

/// A single prompt in a survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,

    #[serde(rename = "type")]
    kind: QuestionType,

    text: String,

    #[serde(default)]
    options: Vec<QuestionOption>,
}

impl Question {
    /// Create a question from its parts.
    pub fn new(
        id: impl Into<QuestionId>,
        kind: QuestionType,
        text: impl Into<String>,
        options: Vec<QuestionOption>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            text: text.into(),
            options,
        }
    }

    /// Create a question with a fresh id.
    ///
    /// Choice questions start with one empty option; text questions with none.
    pub fn seeded(kind: QuestionType, text: impl Into<String>, ids: &mut impl IdGenerator) -> Self {
        let id = ids.next_id();
        let options = if kind.is_choice() {
            vec![QuestionOption::blank(ids)]
        } else {
            Vec::new()
        };
        Self::new(id, kind, text, options)
    }

    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    pub fn kind(&self) -> QuestionType {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &[QuestionOption] {
        &self.options
    }

    /// Find an option by id.
    pub fn option(&self, id: &str) -> Option<&QuestionOption> {
        self.options.iter().find(|o| o.id == *id)
    }

    /// Position of an option by id.
    pub fn option_index(&self, id: &str) -> Option<usize> {
        self.options.iter().position(|o| o.id == *id)
    }

    pub(crate) fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub(crate) fn options_mut(&mut self) -> &mut Vec<QuestionOption> {
        &mut self.options
    }

    /// Switch to another question type.
    ///
    /// Text questions drop their options. Choice questions keep existing
    /// options, or get one empty option if they have none.
    pub(crate) fn change_kind(&mut self, kind: QuestionType, ids: &mut impl IdGenerator) {
        self.kind = kind;
        if kind.is_choice() {
            if self.options.is_empty() {
                self.options.push(QuestionOption::blank(ids));
            }
        } else {
            self.options.clear();
        }
    }

    /// Copy of this question with fresh ids for itself and every option.
    pub(crate) fn duplicate(&self, ids: &mut impl IdGenerator) -> Self {
        let id = ids.next_id();
        let options = self
            .options
            .iter()
            .map(|option| option.copy_with_new_id(ids))
            .collect();
        Self::new(id, self.kind, self.text.clone(), options)
    }
}
