//! survey-builder command line tool.

use std::io::{self, IsTerminal};
use std::time::Duration;

use clap::Parser;
use survey_builder_cli::config::resolve_store_dir;
use survey_builder_cli::logging::{LogConfig, LogFormat, init_logging};

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg};
use crate::commands::Context;

fn main() {
    let cli = Cli::parse();
    init_logging(&log_config_from_cli(&cli));

    let ctx = Context {
        store_dir: resolve_store_dir(cli.store_dir),
        submit_delay: Duration::from_millis(cli.submit_delay_ms),
    };
    tracing::debug!(store_dir = %ctx.store_dir.display(), "using store directory");

    if let Err(error) = run(&ctx, cli.command) {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

fn run(ctx: &Context, command: Command) -> anyhow::Result<()> {
    match command {
        Command::New(args) => commands::run_new(ctx, args),
        Command::Show(args) => commands::run_show(ctx, args),
        Command::List => commands::run_list(ctx),
        Command::Remove(args) => commands::run_remove(ctx, args),
        Command::Meta(args) => commands::run_meta(ctx, args),
        Command::AddQuestion(args) => commands::run_add_question(ctx, args),
        Command::UpdateQuestion(args) => commands::run_update_question(ctx, args),
        Command::DeleteQuestion(args) => commands::run_delete_question(ctx, args),
        Command::DuplicateQuestion(args) => commands::run_duplicate_question(ctx, args),
        Command::MoveQuestion(args) => commands::run_move_question(ctx, args),
        Command::AddOption(args) => commands::run_add_option(ctx, args),
        Command::UpdateOption(args) => commands::run_update_option(ctx, args),
        Command::DeleteOption(args) => commands::run_delete_option(ctx, args),
        Command::MoveOption(args) => commands::run_move_option(ctx, args),
        Command::Apply(args) => commands::run_apply(ctx, args),
        Command::Preview(args) => commands::run_preview(ctx, args),
        Command::Export(args) => commands::run_export(ctx, args),
        Command::Submit(args) => commands::run_submit(ctx, args),
        Command::Next(args) => commands::run_next(ctx, args),
    }
}

/// Build logging configuration from CLI flags.
///
/// `RUST_LOG` applies unless `-v` or `-q` was given.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    LogConfig {
        use_env_filter: !cli.verbosity.is_present(),
        ..LogConfig::default()
    }
    .with_level(cli.verbosity.tracing_level_filter())
    .with_format(format)
    .with_ansi(io::stderr().is_terminal())
    .with_timestamps(cli.log_timestamps)
}
