mod commands;
mod error;
mod notify;
mod payment;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{appointments, book, services, Context};
use crate::error::{exit_code_for, report_error};
use crate::notify::StderrNotifier;
use carebook_config as config;
use carebook_store::{paths, Store};

#[derive(Debug, Parser)]
#[command(name = "carebook", version, about = "carebook appointment booking CLI")]
struct Cli {
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List bookable services
    Services(services::ServicesArgs),
    /// Book an appointment: service, date, patient details, payment
    Book(book::BookArgs),
    #[command(subcommand, alias = "appt")]
    Appointments(appointments::AppointmentCommand),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        db_path,
        config: config_path,
        json,
        verbose: _,
        command,
    } = cli;

    let app_config = config::load(config_path).with_context(|| "load config")?;
    match &app_config.source {
        Some(path) => debug!(path = %path.display(), "config loaded"),
        None => debug!("no config file, using defaults"),
    }

    match command {
        Command::Services(args) => services::list_services(&app_config, json, args),
        command => {
            let db_path =
                paths::resolve_db_path(db_path).with_context(|| "resolve database path")?;
            debug!(path = %db_path.display(), "database path resolved");

            let store = Store::open(&db_path)
                .with_context(|| format!("open database {}", db_path.display()))?;
            store.migrate().with_context(|| "run migrations")?;

            let notifier = StderrNotifier { quiet: json };
            let ctx = Context {
                store: &store,
                json,
                config: &app_config,
                notifier: &notifier,
            };

            match command {
                Command::Book(args) => book::book(&ctx, args),
                Command::Appointments(cmd) => match cmd {
                    appointments::AppointmentCommand::List(args) => appointments::list(&ctx, args),
                    appointments::AppointmentCommand::Show(args) => appointments::show(&ctx, args),
                    appointments::AppointmentCommand::Complete(args) => {
                        appointments::complete(&ctx, args)
                    }
                    appointments::AppointmentCommand::Cancel(args) => {
                        appointments::cancel(&ctx, args)
                    }
                    appointments::AppointmentCommand::Delete(args) => {
                        appointments::delete(&ctx, args)
                    }
                },
                Command::Services(_) => {
                    unreachable!("services command handled before store initialization")
                }
            }
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
