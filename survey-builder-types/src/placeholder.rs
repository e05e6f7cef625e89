//! Text shown in previews where the survey has nothing to show.

pub const SURVEY_TITLE: &str = "Untitled Survey";
pub const QUESTION_TEXT: &str = "Untitled Question";
pub const OPTION_TEXT: &str = "Untitled Answer";
pub const NO_OPTIONS: &str = "No answers defined.";
pub const TEXT_ANSWER: &str = "[Text input answer]";
pub const NO_QUESTIONS: &str = "No questions added yet.";

/// `text`, or `placeholder` when `text` is empty.
pub fn or_placeholder<'a>(text: &'a str, placeholder: &'a str) -> &'a str {
    if text.is_empty() { placeholder } else { text }
}
