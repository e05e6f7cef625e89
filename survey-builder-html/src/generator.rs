//! HTML preview generator implementation.

use survey_builder_types::placeholder::{self, or_placeholder};
use survey_builder_types::{Question, QuestionType, SurveyState};

const DEFAULT_PREFIX: &str = "survey";

/// Options for HTML generation.
#[derive(Debug, Clone, Default)]
pub struct HtmlOptions {
    /// Title for the HTML document. Defaults to the survey title.
    pub title: Option<String>,
    /// Whether to include default CSS styling.
    pub include_styles: bool,
    /// Whether to generate a complete HTML document (with html/head/body tags).
    pub full_document: bool,
    /// Custom CSS class prefix for all generated elements.
    ///
    /// Only ASCII letters, digits, `-` and `_` are used; other characters are
    /// dropped. An empty result falls back to `survey`.
    pub class_prefix: String,
}

impl HtmlOptions {
    /// Create new options with default values.
    pub fn new() -> Self {
        Self {
            title: None,
            include_styles: true,
            full_document: true,
            class_prefix: DEFAULT_PREFIX.to_string(),
        }
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enable or disable default CSS styling.
    pub fn with_styles(mut self, include: bool) -> Self {
        self.include_styles = include;
        self
    }

    /// Generate a complete HTML document or just the form fragment.
    pub fn full_document(mut self, full: bool) -> Self {
        self.full_document = full;
        self
    }

    /// Set a custom CSS class prefix.
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }
}

/// Generate the HTML preview of `survey`.
pub fn to_html(survey: &SurveyState, options: &HtmlOptions) -> String {
    let mut html = String::new();
    let prefix = &sanitize_prefix(&options.class_prefix);
    let heading = or_placeholder(&survey.title, placeholder::SURVEY_TITLE);

    if options.full_document {
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("  <meta charset=\"UTF-8\">\n");
        html.push_str(
            "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        let title = options.title.as_deref().unwrap_or(heading);
        html.push_str(&format!("  <title>{}</title>\n", escape_html(title)));

        if options.include_styles {
            html.push_str(&generate_styles(prefix));
        }

        html.push_str("</head>\n<body>\n");
    }

    html.push_str(&format!(
        "<form class=\"{prefix}-form\" data-survey-id=\"{}\">\n",
        escape_html(survey.id.as_str())
    ));
    html.push_str(&format!(
        "  <h1 class=\"{prefix}-title\">{}</h1>\n",
        escape_html(heading)
    ));
    if !survey.description.is_empty() {
        html.push_str(&format!(
            "  <p class=\"{prefix}-description\">{}</p>\n",
            escape_html(&survey.description)
        ));
    }

    html.push_str(&format!("  <div class=\"{prefix}-questions\">\n"));
    if survey.questions.is_empty() {
        html.push_str(&format!(
            "    <p class=\"{prefix}-empty\">{}</p>\n",
            placeholder::NO_QUESTIONS
        ));
    }
    for (index, question) in survey.questions.iter().enumerate() {
        html.push_str(&generate_question(question, index, prefix));
    }
    html.push_str("  </div>\n");

    html.push_str(&format!(
        "  <button type=\"submit\" class=\"{prefix}-submit\">Submit Survey</button>\n"
    ));
    html.push_str("</form>\n");

    if options.full_document {
        html.push_str("</body>\n</html>\n");
    }

    html
}

fn sanitize_prefix(raw: &str) -> String {
    let prefix: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if prefix.is_empty() {
        DEFAULT_PREFIX.to_string()
    } else {
        prefix
    }
}

/// Generate HTML for a single question.
fn generate_question(question: &Question, index: usize, prefix: &str) -> String {
    let mut html = String::new();
    let ind = "    ";
    let name = escape_html(question.id().as_str());
    let field_id = format!("{prefix}-q{}", index + 1);
    let legend = format!(
        "Q{}. {}",
        index + 1,
        or_placeholder(question.text(), placeholder::QUESTION_TEXT)
    );

    html.push_str(&format!(
        "{ind}<fieldset class=\"{prefix}-fieldset {prefix}-{}\">\n",
        question.kind().as_str().to_ascii_lowercase().replace('_', "-")
    ));
    html.push_str(&format!("{ind}  <legend>{}</legend>\n", escape_html(&legend)));
    html.push_str(&format!(
        "{ind}  <div class=\"{prefix}-type\">{}</div>\n",
        question.kind().label()
    ));

    let input_type = match question.kind() {
        QuestionType::TextInput => {
            html.push_str(&format!(
                "{ind}  <textarea id=\"{field_id}\" name=\"{name}\" rows=\"4\" class=\"{prefix}-textarea\" placeholder=\"{}\"></textarea>\n",
                escape_html(placeholder::TEXT_ANSWER)
            ));
            html.push_str(&format!("{ind}</fieldset>\n"));
            return html;
        }
        QuestionType::SingleChoice => "radio",
        QuestionType::MultipleChoice => "checkbox",
    };

    if question.options().is_empty() {
        html.push_str(&format!(
            "{ind}  <p class=\"{prefix}-empty\">{}</p>\n",
            placeholder::NO_OPTIONS
        ));
    }
    let group_name = match question.kind() {
        QuestionType::MultipleChoice => format!("{name}[]"),
        _ => name.clone(),
    };
    for (idx, option) in question.options().iter().enumerate() {
        let option_id = format!("{field_id}-{idx}");
        let label = or_placeholder(option.text(), placeholder::OPTION_TEXT);
        html.push_str(&format!(
            "{ind}  <div class=\"{prefix}-{input_type}-option\">\n"
        ));
        html.push_str(&format!(
            "{ind}    <input type=\"{input_type}\" id=\"{option_id}\" name=\"{group_name}\" value=\"{}\">\n",
            escape_html(option.id().as_str())
        ));
        html.push_str(&format!(
            "{ind}    <label for=\"{option_id}\">{}</label>\n",
            escape_html(label)
        ));
        html.push_str(&format!("{ind}  </div>\n"));
    }

    html.push_str(&format!("{ind}</fieldset>\n"));
    html
}

/// Escape HTML special characters.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Generate default CSS styles.
fn generate_styles(prefix: &str) -> String {
    format!(
        r#"  <style>
    .{prefix}-form {{
      max-width: 640px;
      margin: 2rem auto;
      padding: 1rem;
      font-family: sans-serif;
    }}
    .{prefix}-description {{
      color: #555;
      white-space: pre-wrap;
    }}
    .{prefix}-fieldset {{
      margin: 1rem 0;
      padding: 1rem;
      border: 1px solid #dbeafe;
      border-radius: 0.5rem;
    }}
    .{prefix}-fieldset legend {{
      font-weight: bold;
    }}
    .{prefix}-type {{
      font-size: 0.8rem;
      color: #2563eb;
      margin-bottom: 0.5rem;
    }}
    .{prefix}-radio-option, .{prefix}-checkbox-option {{
      margin: 0.25rem 0;
    }}
    .{prefix}-textarea {{
      width: 100%;
      padding: 0.5rem;
      box-sizing: border-box;
    }}
    .{prefix}-empty {{
      font-style: italic;
      color: #888;
    }}
    .{prefix}-submit {{
      margin-top: 1rem;
      padding: 0.5rem 1rem;
    }}
  </style>
"#
    )
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use survey_builder_types::QuestionOption;

    use super::*;

    fn survey() -> SurveyState {
        let mut survey = SurveyState::new("s1", Utc::now());
        survey.title = "Tea & <Coffee>".into();
        survey.description = "Pick \"one\"".into();
        survey.questions = vec![
            Question::new(
                "q1",
                QuestionType::SingleChoice,
                "Which?",
                vec![QuestionOption::new("o1", "Tea"), QuestionOption::new("o2", "")],
            ),
            Question::new(
                "q2",
                QuestionType::MultipleChoice,
                "Extras",
                vec![QuestionOption::new("o3", "Milk")],
            ),
            Question::new("q3", QuestionType::TextInput, "", Vec::new()),
        ];
        survey
    }

    #[test]
    fn html_options_chaining() {
        let options = HtmlOptions::new()
            .with_title("Test Survey")
            .with_styles(false)
            .full_document(true)
            .with_class_prefix("my-form");

        assert_eq!(options.title, Some("Test Survey".to_string()));
        assert!(!options.include_styles);
        assert!(options.full_document);
        assert_eq!(options.class_prefix, "my-form");
    }

    #[test]
    fn escapes_user_text() {
        let html = to_html(&survey(), &HtmlOptions::new());
        assert!(html.contains("<title>Tea &amp; &lt;Coffee&gt;</title>"));
        assert!(html.contains("Pick &quot;one&quot;"));
        assert!(!html.contains("<Coffee>"));
    }

    #[test]
    fn renders_inputs_per_question_type() {
        let html = to_html(&survey(), &HtmlOptions::new());
        assert!(html.contains(
            "<input type=\"radio\" id=\"survey-q1-0\" name=\"q1\" value=\"o1\">"
        ));
        assert!(html.contains("<label for=\"survey-q1-1\">Untitled Answer</label>"));
        assert!(html.contains(
            "<input type=\"checkbox\" id=\"survey-q2-0\" name=\"q2[]\" value=\"o3\">"
        ));
        assert!(html.contains("<textarea id=\"survey-q3\" name=\"q3\""));
        assert!(html.contains("<legend>Q3. Untitled Question</legend>"));
    }

    #[test]
    fn fragment_without_document_or_styles() {
        let options = HtmlOptions::new()
            .full_document(false)
            .with_styles(false)
            .with_class_prefix("pv");
        let html = to_html(&survey(), &options);
        assert!(html.starts_with("<form class=\"pv-form\""));
        assert!(!html.contains("<style>"));
        assert!(!html.contains("<html"));
    }

    #[test]
    fn empty_survey_shows_placeholders() {
        let survey = SurveyState::new("empty", Utc::now());
        let html = to_html(&survey, &HtmlOptions::new());
        assert!(html.contains("<h1 class=\"survey-title\">Untitled Survey</h1>"));
        assert!(html.contains("No questions added yet."));
    }

    #[test]
    fn custom_prefix_applies_to_styles() {
        let html = to_html(&survey(), &HtmlOptions::new().with_class_prefix("custom"));
        assert!(html.contains(".custom-form {"));
        assert!(html.contains("class=\"custom-fieldset custom-single-choice\""));
    }

    #[test]
    fn prefix_cannot_break_out_of_attributes_or_css() {
        let options = HtmlOptions::new().with_class_prefix("x\"><script>{}</script");
        let html = to_html(&survey(), &options);
        assert!(!html.contains("<script>"));
        assert!(html.contains("<form class=\"xscriptscript-form\""));
        assert!(html.contains(".xscriptscript-form {"));

        let html = to_html(&survey(), &HtmlOptions::new().with_class_prefix("\"<>"));
        assert!(html.contains("<form class=\"survey-form\""));
    }
}
