/// Error returned when a string does not name a question type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown question type '{0}', expected one of SINGLE_CHOICE, MULTIPLE_CHOICE, TEXT_INPUT")]
pub struct ParseQuestionTypeError(pub String);
