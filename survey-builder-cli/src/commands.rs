//! Command implementations.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context as _, Result, bail};
use survey_builder::placeholder::{self, or_placeholder};
use survey_builder::{
    BuilderSession, FileStore, Opened, QuestionType, Step, SurveyAction, TextPreview,
};
use survey_builder_html::HtmlOptions;

use crate::cli::{
    AddOptionArgs, AddQuestionArgs, ApplyArgs, ExportArgs, MetaArgs, MoveOptionArgs,
    MoveQuestionArgs, NewArgs, NextArgs, OptionArg, PreviewArgs, QuestionArg, ShowArgs,
    SurveyArg, UpdateOptionArgs, UpdateQuestionArgs,
};

type Session = BuilderSession<FileStore>;

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    pub store_dir: PathBuf,
    pub submit_delay: Duration,
}

impl Context {
    fn session(&self) -> Session {
        BuilderSession::new(FileStore::new(&self.store_dir)).with_submit_delay(self.submit_delay)
    }

    /// Open a stored survey; unknown ids are an error.
    fn open(&self, id: &str) -> Result<Session> {
        self.open_at(id, Step::Details)
    }

    fn open_at(&self, id: &str, step: Step) -> Result<Session> {
        let mut session = self.session().with_step(step);
        let opened = session
            .open(Some(id))
            .with_context(|| format!("Failed to load survey '{id}'"))?;
        if opened != Opened::Restored {
            bail!("No stored survey with id '{id}'");
        }
        Ok(session)
    }

    /// Apply one action to a stored survey and save it.
    fn edit(&self, id: &str, action: SurveyAction) -> Result<Session> {
        let mut session = self.open(id)?;
        apply(&mut session, action)?;
        save(&mut session)?;
        Ok(session)
    }
}

fn apply(session: &mut Session, action: SurveyAction) -> Result<()> {
    let name = action.name();
    if !session.dispatch(action) {
        bail!("'{name}' changed nothing; check the question and option ids and indices");
    }
    Ok(())
}

fn save(session: &mut Session) -> Result<()> {
    session
        .try_save()
        .with_context(|| format!("Failed to save survey '{}'", session.state().id))?;
    Ok(())
}

pub fn run_new(ctx: &Context, args: NewArgs) -> Result<()> {
    let mut session = ctx.session();
    session.open(None).context("Failed to start a survey")?;
    if args.title.is_some() || args.description.is_some() {
        session.dispatch(SurveyAction::UpdateMetadata {
            title: args.title,
            description: args.description,
        });
    }
    save(&mut session)?;
    println!("{}", session.state().id);
    Ok(())
}

pub fn run_show(ctx: &Context, args: ShowArgs) -> Result<()> {
    let session = ctx.open(&args.survey)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(session.state())?);
    } else {
        print!("{}", TextPreview::new(session.state()));
    }
    Ok(())
}

pub fn run_list(ctx: &Context) -> Result<()> {
    let session = ctx.session();
    let summaries = session
        .repository()
        .list()
        .context("Failed to list stored surveys")?;
    if summaries.is_empty() {
        println!("No surveys stored yet.");
    }
    for summary in summaries {
        let updated = summary
            .updated_at
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{}\t{}\t{} question(s)\t{updated}",
            summary.id,
            or_placeholder(&summary.title, placeholder::SURVEY_TITLE),
            summary.question_count,
        );
    }
    Ok(())
}

pub fn run_remove(ctx: &Context, args: SurveyArg) -> Result<()> {
    let mut session = ctx.session();
    let removed = session
        .repository_mut()
        .remove(&args.survey)
        .with_context(|| format!("Failed to remove survey '{}'", args.survey))?;
    if !removed {
        bail!("No stored survey with id '{}'", args.survey);
    }
    Ok(())
}

pub fn run_meta(ctx: &Context, args: MetaArgs) -> Result<()> {
    if args.title.is_none() && args.description.is_none() {
        bail!("Nothing to change: pass --title and/or --description");
    }
    ctx.edit(
        &args.survey,
        SurveyAction::UpdateMetadata {
            title: args.title,
            description: args.description,
        },
    )?;
    Ok(())
}

pub fn run_add_question(ctx: &Context, args: AddQuestionArgs) -> Result<()> {
    let kind = QuestionType::from(args.kind);
    let session = ctx.edit(&args.survey, SurveyAction::add_question(kind, args.text))?;
    if let Some(question) = session.state().questions.last() {
        println!("{}", question.id());
    }
    Ok(())
}

pub fn run_update_question(ctx: &Context, args: UpdateQuestionArgs) -> Result<()> {
    ctx.edit(
        &args.survey,
        SurveyAction::UpdateQuestion {
            question_id: args.question.into(),
            text: args.text,
            kind: args.kind.map(QuestionType::from),
        },
    )?;
    Ok(())
}

pub fn run_delete_question(ctx: &Context, args: QuestionArg) -> Result<()> {
    ctx.edit(&args.survey, SurveyAction::delete_question(args.question))?;
    Ok(())
}

pub fn run_duplicate_question(ctx: &Context, args: QuestionArg) -> Result<()> {
    let mut session = ctx.open(&args.survey)?;
    let Some(index) = session.state().question_index(&args.question) else {
        bail!("No question '{}' in survey '{}'", args.question, args.survey);
    };
    apply(&mut session, SurveyAction::duplicate_question(args.question))?;
    save(&mut session)?;
    println!("{}", session.state().questions[index + 1].id());
    Ok(())
}

pub fn run_move_question(ctx: &Context, args: MoveQuestionArgs) -> Result<()> {
    ctx.edit(
        &args.survey,
        SurveyAction::ReorderQuestions {
            from_index: args.from,
            to_index: args.to,
        },
    )?;
    Ok(())
}

pub fn run_add_option(ctx: &Context, args: AddOptionArgs) -> Result<()> {
    let mut session = ctx.open(&args.survey)?;
    apply(&mut session, SurveyAction::add_option(args.question.as_str()))?;

    let question = session
        .state()
        .question(&args.question)
        .context("question vanished after adding an option")?;
    let option_id = question
        .options()
        .last()
        .map(|option| option.id().clone())
        .context("question has no options after adding one")?;

    if let Some(text) = args.text {
        apply(
            &mut session,
            SurveyAction::update_option(args.question.as_str(), option_id.clone(), text),
        )?;
    }
    save(&mut session)?;
    println!("{option_id}");
    Ok(())
}

pub fn run_update_option(ctx: &Context, args: UpdateOptionArgs) -> Result<()> {
    ctx.edit(
        &args.survey,
        SurveyAction::update_option(args.question, args.option, args.text),
    )?;
    Ok(())
}

pub fn run_delete_option(ctx: &Context, args: OptionArg) -> Result<()> {
    ctx.edit(
        &args.survey,
        SurveyAction::delete_option(args.question, args.option),
    )?;
    Ok(())
}

pub fn run_move_option(ctx: &Context, args: MoveOptionArgs) -> Result<()> {
    ctx.edit(
        &args.survey,
        SurveyAction::reorder_options(args.question, args.from, args.to),
    )?;
    Ok(())
}

pub fn run_apply(ctx: &Context, args: ApplyArgs) -> Result<()> {
    let text = read_input(&args.actions)?;
    let actions: Vec<SurveyAction> = serde_json::from_str(&text)
        .with_context(|| format!("Invalid action list in {}", args.actions.display()))?;

    let resets = actions.iter().any(|action| {
        matches!(
            action,
            SurveyAction::Reset | SurveyAction::ResetWithId { .. } | SurveyAction::RestoreSurvey(_)
        )
    });
    if resets {
        bail!("Action lists may only edit the survey, not replace it");
    }

    let mut session = ctx.open(&args.survey)?;
    let total = actions.len();
    let applied = actions
        .into_iter()
        .map(|action| session.dispatch(action))
        .filter(|changed| *changed)
        .count();
    save(&mut session)?;
    println!("{applied} of {total} actions changed the survey");
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read actions from stdin")?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

pub fn run_preview(ctx: &Context, args: PreviewArgs) -> Result<()> {
    let session = ctx.open(&args.survey)?;
    let rendered = if args.html {
        let options = HtmlOptions::new()
            .with_styles(!args.no_styles)
            .with_class_prefix(args.class_prefix);
        survey_builder_html::to_html(session.state(), &options)
    } else {
        TextPreview::new(session.state()).to_string()
    };

    match args.out {
        Some(path) => {
            fs::write(&path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

pub fn run_export(ctx: &Context, args: ExportArgs) -> Result<()> {
    let session = ctx.open(&args.survey)?;
    let path = session
        .export(&args.out)
        .with_context(|| format!("Failed to export into {}", args.out.display()))?;
    println!("{}", path.display());
    Ok(())
}

pub fn run_submit(ctx: &Context, args: SurveyArg) -> Result<()> {
    let mut session = ctx.open(&args.survey)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start the async runtime")?;
    let submission = runtime.block_on(session.submit())?;
    println!("{}", serde_json::to_string(&submission)?);
    Ok(())
}

pub fn run_next(ctx: &Context, args: NextArgs) -> Result<()> {
    let mut session = ctx.open_at(&args.survey, args.from.into())?;
    match session.next() {
        None => bail!("Already on the last step"),
        Some(result) => {
            let route = result?;
            println!("{route}");
        }
    }
    Ok(())
}
