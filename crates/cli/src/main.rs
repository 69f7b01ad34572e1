//! Runplane operator shell.
//!
//! Two modes:
//! - **REPL mode**: `runplane [flags]` - interactive prompt (if stdin is TTY)
//! - **Pipe mode**: `echo "create payments-api codex:gpt-5" | runplane` - line-by-line from stdin
//!
//! The tracker lives for the duration of the process. `--seed` loads three
//! demo runs so the dashboard has something to show.

mod format;
mod parse;
mod repl;
mod seed;
mod state;

use std::io::IsTerminal;
use std::process;

use clap::{Arg, ArgAction, ArgMatches, Command};
use runplane::Runplane;
use tracing_subscriber::EnvFilter;

use format::OutputMode;
use state::SessionState;

fn build_cli() -> Command {
    Command::new("runplane")
        .about("Run lifecycle tracker shell")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("PATH")
                .help("TOML tracker configuration"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print results and errors as JSON"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .action(ArgAction::SetTrue)
                .help("Load three demo runs as $1, $2 and $3"),
        )
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("RUNPLANE_LOG").unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_runplane(matches: &ArgMatches) -> Result<Runplane, String> {
    let mut builder = Runplane::builder();
    if let Some(path) = matches.get_one::<String>("config") {
        builder = builder
            .config_file(path)
            .map_err(|e| format!("Failed to load config {}: {}", path, e))?;
    }
    builder
        .build()
        .map_err(|e| format!("Failed to start tracker: {}", e))
}

fn main() {
    init_tracing();
    let matches = build_cli().get_matches();

    let output_mode = if matches.get_flag("json") {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let rp = match open_runplane(&matches) {
        Ok(rp) => rp,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let mut state = SessionState::new(rp);

    if matches.get_flag("seed") {
        if let Err(e) = seed::load(&mut state) {
            eprintln!("{}", format::format_error(&e, output_mode));
            process::exit(1);
        }
    }

    if std::io::stdin().is_terminal() {
        repl::run_repl(&mut state, output_mode);
    } else {
        let exit_code = repl::run_pipe(&mut state, output_mode);
        process::exit(exit_code);
    }
}
