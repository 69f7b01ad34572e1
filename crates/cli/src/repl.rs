//! Interactive and piped line loops.

use std::io::BufRead;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use runplane::Error;

use crate::format::{format_error, format_output, OutputMode};
use crate::parse::{parse_line, CliAction, MetaCommand, HELP};
use crate::state::SessionState;

/// Outcome of one input line.
enum Step {
    Continue { failed: bool },
    Quit,
}

fn handle_line(state: &mut SessionState, line: &str, mode: OutputMode, repl: bool) -> Step {
    let action = match parse_line(line) {
        Ok(action) => action,
        Err(e) => return report(&e, mode),
    };
    match action {
        CliAction::Nothing => Step::Continue { failed: false },
        CliAction::Meta(MetaCommand::Quit) => Step::Quit,
        CliAction::Meta(MetaCommand::Help) => {
            if repl {
                println!("{}", HELP);
            } else {
                eprintln!("{}", HELP);
            }
            Step::Continue { failed: false }
        }
        CliAction::Execute(cmd) => match state.execute(cmd) {
            Ok(output) => {
                println!("{}", format_output(&output, mode));
                Step::Continue { failed: false }
            }
            Err(e) => report(&e, mode),
        },
    }
}

/// Parse and execution failures share one error format.
fn report(err: &Error, mode: OutputMode) -> Step {
    eprintln!("{}", format_error(err, mode));
    Step::Continue { failed: true }
}

pub fn run_repl(state: &mut SessionState, mode: OutputMode) {
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("(error) cannot start line editor: {}", e);
            return;
        }
    };

    loop {
        match rl.readline("runplane> ") {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }
                if let Step::Quit = handle_line(state, &line, mode, true) {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("(error) {}", e);
                break;
            }
        }
    }
}

/// Execute stdin line by line. Returns the process exit code: 1 if any
/// line failed to parse or execute, 0 otherwise.
pub fn run_pipe(state: &mut SessionState, mode: OutputMode) -> i32 {
    let stdin = std::io::stdin();
    let mut exit_code = 0;

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("(error) {}", e);
                return 1;
            }
        };
        match handle_line(state, &line, mode, false) {
            Step::Continue { failed } => {
                if failed {
                    exit_code = 1;
                }
            }
            Step::Quit => break,
        }
    }

    exit_code
}
