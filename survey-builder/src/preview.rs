//! Plain-text preview of a survey, as a respondent would read it.

use std::fmt;

use survey_builder_types::placeholder::{self, or_placeholder};
use survey_builder_types::{Question, QuestionType, SurveyState};

/// Displays a survey as readable text.
///
/// ```rust,ignore
/// println!("{}", TextPreview::new(store.state()));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TextPreview<'a> {
    survey: &'a SurveyState,
}

impl<'a> TextPreview<'a> {
    pub fn new(survey: &'a SurveyState) -> Self {
        Self { survey }
    }
}

impl fmt::Display for TextPreview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let survey = self.survey;
        writeln!(f, "{}", or_placeholder(&survey.title, placeholder::SURVEY_TITLE))?;
        if !survey.description.trim().is_empty() {
            writeln!(f, "{}", survey.description)?;
        }

        if survey.questions.is_empty() {
            writeln!(f)?;
            return writeln!(f, "{}", placeholder::NO_QUESTIONS);
        }
        for (index, question) in survey.questions.iter().enumerate() {
            writeln!(f)?;
            write_question(f, index, question)?;
        }
        Ok(())
    }
}

fn write_question(f: &mut fmt::Formatter<'_>, index: usize, question: &Question) -> fmt::Result {
    writeln!(
        f,
        "Q{}. {}",
        index + 1,
        or_placeholder(question.text(), placeholder::QUESTION_TEXT)
    )?;
    writeln!(f, "    {}", question.kind().label())?;

    if question.kind() == QuestionType::TextInput {
        return writeln!(f, "    {}", placeholder::TEXT_ANSWER);
    }
    if question.options().is_empty() {
        return writeln!(f, "    {}", placeholder::NO_OPTIONS);
    }
    let marker = match question.kind() {
        QuestionType::SingleChoice => "( )",
        _ => "[ ]",
    };
    for option in question.options() {
        let text = or_placeholder(option.text(), placeholder::OPTION_TEXT);
        writeln!(f, "    {marker} {text}")?;
    }
    Ok(())
}
