use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Question, SurveyId};

/// The survey being authored: metadata plus an ordered list of questions.
///
/// This is also the persisted snapshot and export format, so field names
/// follow the JSON document (`createdAt`, `updatedAt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyState {
    pub id: SurveyId,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub questions: Vec<Question>,

    /// Set when the survey is created, never touched afterwards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Stamped by the persistence layer on every save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SurveyState {
    /// Create an empty survey with the given id, created at `now`.
    pub fn new(id: impl Into<SurveyId>, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            description: String::new(),
            questions: Vec::new(),
            created_at: Some(now),
            updated_at: None,
        }
    }

    /// Find a question by id.
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    /// Position of a question by id.
    pub fn question_index(&self, id: &str) -> Option<usize> {
        self.questions.iter().position(|q| q.id() == id)
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Total number of options across all questions.
    pub fn option_count(&self) -> usize {
        self.questions.iter().map(|q| q.options().len()).sum()
    }

    /// Check if the survey has no questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Both title and description contain something other than whitespace.
    pub fn has_metadata(&self) -> bool {
        !self.title.trim().is_empty() && !self.description.trim().is_empty()
    }

    /// The same survey, stamped as saved at `now`.
    pub fn stamped(&self, now: DateTime<Utc>) -> Self {
        Self {
            updated_at: Some(now),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::{QuestionOption, QuestionType};

    fn sample() -> SurveyState {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut survey = SurveyState::new("s1", now);
        survey.title = "Team feedback".into();
        survey.questions.push(Question::new(
            "q1",
            QuestionType::SingleChoice,
            "Color?",
            vec![QuestionOption::new("o1", "Red"), QuestionOption::new("o2", "")],
        ));
        survey
    }

    #[test]
    fn json_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], "s1");
        assert_eq!(json["createdAt"], "2024-05-01T12:00:00Z");
        assert!(json.get("updatedAt").is_none());
        assert_eq!(json["questions"][0]["type"], "SINGLE_CHOICE");
        assert_eq!(json["questions"][0]["options"][1]["text"], "");
    }

    #[test]
    fn accepts_browser_style_timestamps_and_missing_fields() {
        let json = r#"{
            "id": "abc",
            "title": "T",
            "questions": [],
            "createdAt": "2024-05-01T12:00:00.000Z"
        }"#;
        let survey: SurveyState = serde_json::from_str(json).unwrap();
        assert_eq!(survey.description, "");
        assert_eq!(
            survey.created_at,
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
        );
        assert_eq!(survey.updated_at, None);
    }

    #[test]
    fn lookups() {
        let survey = sample();
        assert_eq!(survey.question_index("q1"), Some(0));
        assert!(survey.question("nope").is_none());
        assert_eq!(survey.option_count(), 2);
        assert_eq!(survey.question("q1").unwrap().option_index("o2"), Some(1));
    }

    #[test]
    fn metadata_requires_non_blank_title_and_description() {
        let mut survey = sample();
        assert!(!survey.has_metadata());
        survey.description = "   ".into();
        assert!(!survey.has_metadata());
        survey.description = "Quarterly".into();
        assert!(survey.has_metadata());
    }

    #[test]
    fn stamped_only_sets_updated_at() {
        let survey = sample();
        let later = Utc.with_ymd_and_hms(2024, 5, 2, 8, 30, 0).unwrap();
        let saved = survey.stamped(later);
        assert_eq!(saved.updated_at, Some(later));
        assert_eq!(saved.created_at, survey.created_at);
        assert_eq!(saved.questions, survey.questions);
    }
}
