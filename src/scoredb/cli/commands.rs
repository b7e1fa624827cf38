use super::logging::init_logging;
use super::render::{print_message, render_config, render_id_list, Terminal};
use super::setup::{get_grouped_help, print_grouped_help, print_help_for_command, Cli, Commands};
use clap::Parser;
use colored::Colorize;
use scoredb::api::{ConfigAction, ScoreDbApi, TempFiles};
use scoredb::commands::{self, CmdMessage};
use scoredb::error::{Result, ScoreDbError};
use scoredb::init::initialize;
use scoredb::interrupt::Interrupt;
use scoredb::tools::process::ProcessTools;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

const USAGE_EXIT: u8 = 2;

pub fn run() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(USAGE_EXIT));
        }
    };
    init_logging(cli.verbose);

    let Some(command) = cli.command else {
        eprint!("{}", get_grouped_help());
        return ExitCode::from(USAGE_EXIT);
    };

    match dispatch(command, cli.root) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn print_error(e: &ScoreDbError) {
    match e {
        ScoreDbError::Interrupted => eprintln!("{}", e),
        _ => eprintln!("{} {}", "Error:".red(), e),
    }
}

fn dispatch(command: Commands, root: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Help { action } => handle_help(action),
        Commands::Init => handle_init(root),
        Commands::List => handle_list(&open_database(root, Interrupt::new())?),
        Commands::Config { key, value } => {
            handle_config(&open_database(root, Interrupt::new())?, key, value)
        }
        Commands::Checkout {
            list_file,
            dest,
            separator,
        } => handle_checkout(&open_interruptible(root)?, list_file, dest, separator),
        Commands::CheckIntegrity { ids } => handle_check_integrity(&open_interruptible(root)?, ids),
        Commands::ExportAll {
            dest,
            keep_temp_files,
        } => handle_export_all(&open_interruptible(root)?, dest, keep_temp_files),
        Commands::View { id } => handle_view(&open_interruptible(root)?, id),
        Commands::Export { id, dest } => handle_export(&open_interruptible(root)?, id, dest),
        Commands::Listen { id, command } => handle_listen(&open_interruptible(root)?, id, command),
    }
}

/// Open the database with Ctrl-C routed to the API's interrupt flag. Only
/// for verbs that poll the flag; the rest keep the default SIGINT behavior.
fn open_interruptible(root: Option<PathBuf>) -> Result<ScoreDbApi<ProcessTools>> {
    let interrupt = Interrupt::new();
    interrupt.install()?;
    open_database(root, interrupt)
}

fn open_database(root: Option<PathBuf>, interrupt: Interrupt) -> Result<ScoreDbApi<ProcessTools>> {
    let cwd = std::env::current_dir()?;
    let ctx = initialize(&cwd, root.as_deref(), interrupt)?;
    Ok(ctx.api)
}

fn handle_help(action: Option<String>) -> Result<()> {
    match action {
        Some(name) => print_help_for_command(&name),
        None => print_grouped_help(),
    }
    Ok(())
}

fn handle_init(root: Option<PathBuf>) -> Result<()> {
    let root = match root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };
    commands::init::run(&root, &mut Terminal)?;
    Ok(())
}

fn handle_list(api: &ScoreDbApi<ProcessTools>) -> Result<()> {
    let result = api.list()?;
    print!("{}", render_id_list(&result.listed));
    Ok(())
}

fn handle_checkout(
    api: &ScoreDbApi<ProcessTools>,
    list_file: PathBuf,
    dest: PathBuf,
    separator: Option<String>,
) -> Result<()> {
    let result = api.checkout(&list_file, &dest, separator.as_deref(), &mut Terminal)?;
    debug!(copied = result.copied.len(), "checkout finished");
    Ok(())
}

fn handle_check_integrity(api: &ScoreDbApi<ProcessTools>, ids: Vec<String>) -> Result<()> {
    let result = api.check_integrity(&ids, &mut Terminal)?;
    println!();

    let broken = result.broken(&api.current_config().extension);
    if !broken.is_empty() {
        return Err(ScoreDbError::BrokenScores(broken));
    }
    print_message(&CmdMessage::success("All is well."));
    Ok(())
}

fn handle_export_all(
    api: &ScoreDbApi<ProcessTools>,
    dest: String,
    keep_temp_files: String,
) -> Result<()> {
    let temp_files = TempFiles::parse(&keep_temp_files)?;
    api.export_all(&dest, temp_files, &mut Terminal)?;
    Ok(())
}

fn handle_view(api: &ScoreDbApi<ProcessTools>, id: String) -> Result<()> {
    api.view(&id, &mut Terminal)?;
    Ok(())
}

fn handle_export(api: &ScoreDbApi<ProcessTools>, id: String, dest: Option<String>) -> Result<()> {
    api.export(&id, dest.as_deref(), &mut Terminal)?;
    Ok(())
}

fn handle_listen(api: &ScoreDbApi<ProcessTools>, id: String, command: String) -> Result<()> {
    api.listen(&id, &command, &mut Terminal)?;
    Ok(())
}

fn handle_config(
    api: &ScoreDbApi<ProcessTools>,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    let action = ConfigAction::from_args(key.as_deref(), value.as_deref())?;
    let show_all = action == ConfigAction::ShowAll;

    let result = api.config(action, &mut Terminal)?;
    if show_all {
        if let Some(config) = &result.config {
            print!("{}", render_config(config));
        }
    }
    Ok(())
}
