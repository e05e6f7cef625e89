//! CLI argument definitions for survey-builder.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use survey_builder::{QuestionType, Step};

#[derive(Parser)]
#[command(
    name = "survey-builder",
    version,
    about = "Author surveys: questions, answer options, previews and exports",
    long_about = "Author surveys from the command line.\n\n\
                  Every survey is stored as a JSON snapshot in the store directory.\n\
                  Commands that edit a survey load it, apply one change and save it again.\n\n\
                  Generated ids may start with '-'. They are accepted as ids as long as they\n\
                  are not a known flag; '--' before the ids always works."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding survey snapshots.
    #[arg(
        long = "store-dir",
        value_name = "DIR",
        env = "SURVEY_BUILDER_DIR",
        global = true
    )]
    pub store_dir: Option<PathBuf>,

    /// Delay of the simulated submission, in milliseconds.
    #[arg(
        long = "submit-delay-ms",
        value_name = "MS",
        env = "SURVEY_BUILDER_SUBMIT_DELAY_MS",
        default_value_t = 1000,
        global = true
    )]
    pub submit_delay_ms: u64,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "compact", global = true)]
    pub log_format: LogFormatArg,

    /// Include timestamps in log lines.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start a new survey and print its id.
    New(NewArgs),

    /// Print a stored survey.
    Show(ShowArgs),

    /// List stored surveys, most recently saved first.
    List,

    /// Delete a stored survey.
    Remove(SurveyArg),

    /// Change the title and/or description.
    Meta(MetaArgs),

    /// Append a question and print its id.
    AddQuestion(AddQuestionArgs),

    /// Change a question's text and optionally its type.
    UpdateQuestion(UpdateQuestionArgs),

    /// Delete a question.
    DeleteQuestion(QuestionArg),

    /// Copy a question right after itself and print the copy's id.
    DuplicateQuestion(QuestionArg),

    /// Move a question to another position (0-based).
    MoveQuestion(MoveQuestionArgs),

    /// Append an answer option and print its id.
    AddOption(AddOptionArgs),

    /// Change an answer option's text.
    UpdateOption(UpdateOptionArgs),

    /// Delete an answer option.
    DeleteOption(OptionArg),

    /// Move an answer option to another position (0-based).
    MoveOption(MoveOptionArgs),

    /// Apply a JSON array of actions from a file ("-" for stdin).
    Apply(ApplyArgs),

    /// Render a preview as text or HTML.
    Preview(PreviewArgs),

    /// Write the survey as `survey-<title>.json`.
    Export(ExportArgs),

    /// Submit the survey and print the submission result.
    Submit(SurveyArg),

    /// Move to the next builder step if the survey allows it.
    Next(NextArgs),
}

#[derive(Args)]
pub struct SurveyArg {
    /// Survey id.
    #[arg(allow_hyphen_values = true)]
    pub survey: String,
}

#[derive(Args)]
pub struct NewArgs {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Survey id.
    #[arg(allow_hyphen_values = true)]
    pub survey: String,

    /// Print the stored JSON instead of the text preview.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct MetaArgs {
    /// Survey id.
    #[arg(allow_hyphen_values = true)]
    pub survey: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct AddQuestionArgs {
    /// Survey id.
    #[arg(allow_hyphen_values = true)]
    pub survey: String,

    /// Question type.
    #[arg(long = "type", value_enum, default_value = "single-choice")]
    pub kind: QuestionTypeArg,

    /// Question text.
    #[arg(default_value = "")]
    pub text: String,
}

#[derive(Args)]
pub struct QuestionArg {
    /// Survey id.
    #[arg(allow_hyphen_values = true)]
    pub survey: String,

    /// Question id.
    #[arg(allow_hyphen_values = true)]
    pub question: String,
}

#[derive(Args)]
pub struct UpdateQuestionArgs {
    /// Survey id.
    #[arg(allow_hyphen_values = true)]
    pub survey: String,

    /// Question id.
    #[arg(allow_hyphen_values = true)]
    pub question: String,

    /// New question text.
    pub text: String,

    /// Switch the question to this type.
    #[arg(long = "type", value_enum)]
    pub kind: Option<QuestionTypeArg>,
}

#[derive(Args)]
pub struct MoveQuestionArgs {
    /// Survey id.
    #[arg(allow_hyphen_values = true)]
    pub survey: String,

    pub from: usize,

    pub to: usize,
}

#[derive(Args)]
pub struct AddOptionArgs {
    /// Survey id.
    #[arg(allow_hyphen_values = true)]
    pub survey: String,

    /// Question id.
    #[arg(allow_hyphen_values = true)]
    pub question: String,

    /// Option text.
    pub text: Option<String>,
}

#[derive(Args)]
pub struct OptionArg {
    /// Survey id.
    #[arg(allow_hyphen_values = true)]
    pub survey: String,

    /// Question id.
    #[arg(allow_hyphen_values = true)]
    pub question: String,

    /// Option id.
    #[arg(allow_hyphen_values = true)]
    pub option: String,
}

#[derive(Args)]
pub struct UpdateOptionArgs {
    /// Survey id.
    #[arg(allow_hyphen_values = true)]
    pub survey: String,

    /// Question id.
    #[arg(allow_hyphen_values = true)]
    pub question: String,

    /// Option id.
    #[arg(allow_hyphen_values = true)]
    pub option: String,

    /// New option text.
    pub text: String,
}

#[derive(Args)]
pub struct MoveOptionArgs {
    /// Survey id.
    #[arg(allow_hyphen_values = true)]
    pub survey: String,

    /// Question id.
    #[arg(allow_hyphen_values = true)]
    pub question: String,

    pub from: usize,

    pub to: usize,
}

#[derive(Args)]
pub struct ApplyArgs {
    /// Survey id.
    #[arg(allow_hyphen_values = true)]
    pub survey: String,

    /// JSON file with an array of actions, or "-" for stdin.
    #[arg(value_name = "FILE")]
    pub actions: PathBuf,
}

#[derive(Args)]
pub struct PreviewArgs {
    /// Survey id.
    #[arg(allow_hyphen_values = true)]
    pub survey: String,

    /// Render a standalone HTML document.
    #[arg(long)]
    pub html: bool,

    /// Leave out the embedded stylesheet.
    #[arg(long = "no-styles", requires = "html")]
    pub no_styles: bool,

    /// CSS class prefix for HTML output.
    #[arg(long = "class-prefix", default_value = "survey")]
    pub class_prefix: String,

    /// Write the preview to a file instead of stdout.
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Survey id.
    #[arg(allow_hyphen_values = true)]
    pub survey: String,

    /// Directory to write the file into.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub out: PathBuf,
}

#[derive(Args)]
pub struct NextArgs {
    /// Survey id.
    #[arg(allow_hyphen_values = true)]
    pub survey: String,

    /// Step the survey is currently on.
    #[arg(long, value_enum, default_value = "details")]
    pub from: StepArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum QuestionTypeArg {
    SingleChoice,
    MultipleChoice,
    TextInput,
}

impl From<QuestionTypeArg> for QuestionType {
    fn from(arg: QuestionTypeArg) -> Self {
        match arg {
            QuestionTypeArg::SingleChoice => QuestionType::SingleChoice,
            QuestionTypeArg::MultipleChoice => QuestionType::MultipleChoice,
            QuestionTypeArg::TextInput => QuestionType::TextInput,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StepArg {
    Details,
    Questions,
    Preview,
}

impl From<StepArg> for Step {
    fn from(arg: StepArg) -> Self {
        match arg {
            StepArg::Details => Step::Details,
            StepArg::Questions => Step::Questions,
            StepArg::Preview => Step::Preview,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_question_type_flag() {
        let cli = Cli::try_parse_from([
            "survey-builder",
            "add-question",
            "abc",
            "--type",
            "text-input",
            "Anything else?",
        ])
        .unwrap();
        let Command::AddQuestion(args) = cli.command else {
            panic!("expected add-question");
        };
        assert_eq!(QuestionType::from(args.kind), QuestionType::TextInput);
        assert_eq!(args.text, "Anything else?");
    }

    #[test]
    fn ids_may_start_with_a_hyphen() {
        let cli = Cli::try_parse_from([
            "survey-builder",
            "update-option",
            "-Xk2",
            "--q_9",
            "-opt",
            "Thai curry",
        ])
        .unwrap();
        let Command::UpdateOption(args) = cli.command else {
            panic!("expected update-option");
        };
        assert_eq!(args.survey, "-Xk2");
        assert_eq!(args.question, "--q_9");
        assert_eq!(args.option, "-opt");

        let cli = Cli::try_parse_from(["survey-builder", "show", "-Xk2", "--json"]).unwrap();
        let Command::Show(args) = cli.command else {
            panic!("expected show");
        };
        assert_eq!(args.survey, "-Xk2");
        assert!(args.json);
    }

    #[test]
    fn known_flags_still_win_over_ids() {
        let cli = Cli::try_parse_from(["survey-builder", "show", "-v", "abc"]).unwrap();
        assert!(cli.verbosity.is_present());
    }
}
