use clap::Parser;
use crudgen_config::ConfigError;
use crudgen_schema::{NormalizeError, SchemaError};
use crudgen_writer::PersistenceError;

mod bootstrap;
mod cli;
mod commands;
mod output;
mod pipeline;
mod ui;

/// Exit status for schema, normalization, config, and usage failures.
const EXIT_INPUT: i32 = 1;
/// Exit status for failures reading or writing the artifact or ledger.
const EXIT_PERSISTENCE: i32 = 2;

fn main() {
    // clap's own exit status for usage errors (2) would collide with
    // EXIT_PERSISTENCE.
    let cli = match cli::Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            std::process::exit(if error.use_stderr() { EXIT_INPUT } else { 0 });
        }
    };

    if let Err(error) = run(cli) {
        eprintln!("crudgen error: {error:#}");
        if let Some(hint) = hint_for(&error) {
            eprintln!("hint: {hint}");
        }
        std::process::exit(exit_code(&error));
    }
}

fn run(cli: cli::Cli) -> anyhow::Result<()> {
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    let config = bootstrap::load_config(&flags)?;
    commands::dispatch(cli.command.unwrap_or_default(), &config, &flags)
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("CRUDGEN_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn exit_code(error: &anyhow::Error) -> i32 {
    if error
        .chain()
        .any(|cause| cause.downcast_ref::<PersistenceError>().is_some())
    {
        EXIT_PERSISTENCE
    } else {
        EXIT_INPUT
    }
}

fn hint_for(error: &anyhow::Error) -> Option<String> {
    error.chain().find_map(|cause| {
        if let Some(e) = cause.downcast_ref::<SchemaError>() {
            Some(e.hint())
        } else if let Some(e) = cause.downcast_ref::<NormalizeError>() {
            Some(e.hint())
        } else if let Some(e) = cause.downcast_ref::<PersistenceError>() {
            Some(e.hint())
        } else {
            cause.downcast_ref::<ConfigError>().map(ConfigError::hint)
        }
    })
}
