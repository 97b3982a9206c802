use clap::{CommandFactory, Parser};
use std::io::{self, BufRead};
use taskline_cli::cli::{Cli, collect_overrides};
use taskline_cli::output::{render_json, render_table};
use taskline_core::command::CommandType;
use taskline_core::config::{load_config_with_fallback, merge_overrides, validate_aliases};
use taskline_core::error::AppError;
use taskline_core::session::Session;
use taskline_core::storage::{self, FlatFileStore};
use tracing::warn;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    // Quiet by default; RUST_LOG=debug shows parsed commands and saves.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(io::stderr);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn open_session(cli: &Cli) -> Result<Session<FlatFileStore>, AppError> {
    let loaded = load_config_with_fallback();
    if let Some(err) = loaded.error {
        warn!(error = %err, "ignoring config file");
    }
    let overrides = collect_overrides(&cli.config_override).map_err(AppError::invalid_input)?;
    validate_aliases(&overrides.aliases)?;
    let config = merge_overrides(&loaded.config, &overrides);

    let path = match cli.store.clone() {
        Some(path) => path,
        None => storage::store_path()?,
    };
    let store = FlatFileStore::new(path);
    if cli.init {
        store.create_if_missing()?;
    }

    Ok(Session::open(store)?.with_aliases(config.aliases))
}

fn run_once(cli: &Cli, mut session: Session<FlatFileStore>) -> Result<(), AppError> {
    let line = cli.command.join(" ");
    let outcome = session.handle(&line)?;

    if cli.json {
        println!("{}", render_json(&outcome, session.tasks()));
    } else if cli.table && outcome.command_type == CommandType::List {
        println!("{}", render_table(session.tasks()));
    } else {
        println!("{}", outcome.message);
    }

    Ok(())
}

fn run_interactive(mut session: Session<FlatFileStore>) -> Result<(), AppError> {
    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_line(&mut input)
            .map_err(|err| AppError::io(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        match session.handle(line) {
            Ok(outcome) => {
                println!("{}", outcome.message);
                if outcome.command_type == CommandType::Exit {
                    break;
                }
            }
            Err(err) => eprintln!("ERROR: {err}"),
        }
    }

    Ok(())
}

fn main() {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    // Startup failures (missing or corrupt task file) end the process here.
    let session = match open_session(&cli) {
        Ok(opened) => opened,
        Err(err) => {
            eprintln!("ERROR: {err}");
            std::process::exit(1);
        }
    };

    let result = if cli.command.is_empty() {
        run_interactive(session)
    } else {
        run_once(&cli, session)
    };

    if let Err(err) = result {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}
