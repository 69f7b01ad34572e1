//! Input line → Command/MetaCommand conversion.
//!
//! Lines are split with shell quoting rules, so labels and reasons with
//! spaces can be quoted: `event $1 policy "policy.evaluated -> allow"`.
//!
//! Anywhere a run id is expected, `$N` refers to the N-th run created (or
//! seeded) in this session.
//!
//! Syntax errors are `InvalidInput`; unrecognized status and event kind
//! names keep their own error codes.

use runplane::{Error, EventKind, Result, RunId, RunStatus, Timestamp, Usd};

/// The result of parsing user input.
#[derive(Debug, Clone, PartialEq)]
pub enum CliAction {
    /// A tracker command to execute via the session.
    Execute(Command),
    /// A shell-only meta-command.
    Meta(MetaCommand),
    /// Blank line or comment.
    Nothing,
}

/// A run reference as typed by the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunRef {
    /// Full run id
    Id(RunId),
    /// `$N`, 1-based
    Index(usize),
}

/// Tracker commands.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Create {
        repo: String,
        agent: String,
    },
    Transition {
        run: RunRef,
        to: RunStatus,
        reason: Option<String>,
    },
    Usage {
        run: RunRef,
        tokens: i64,
        cost: Usd,
    },
    Event {
        run: RunRef,
        kind: EventKind,
        label: String,
    },
    Get {
        run: RunRef,
    },
    Events {
        run: RunRef,
        since: Option<Timestamp>,
    },
    Runs {
        status: Option<RunStatus>,
        limit: Option<usize>,
    },
    Aggregate {
        repo: Option<String>,
    },
    Dashboard {
        limit: Option<usize>,
    },
}

/// Meta-commands handled by the shell itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaCommand {
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  create <repo> <agent>                     create a queued run
  transition <run> <status> [reason]        move a run to another status
  usage <run> <tokens> <cost>               add token and dollar usage
  event <run> <kind> <label>                append a timeline event
  get <run>                                 show one run
  events <run> [since]                      timeline, oldest first
  runs [status] [limit]                     runs, most recently updated first
  aggregate [repo]                          token, cost and failure totals
  dashboard [limit]                         totals, run queue and recent timeline
  help                                      this text
  quit                                      leave the shell

<run> is a run id or $N for the N-th run created in this session.
Statuses: queued claimed running waiting_approval retry_scheduled completed failed canceled
Event kinds: run policy artifact system";

/// Parse one input line.
pub fn parse_line(line: &str) -> Result<CliAction> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(CliAction::Nothing);
    }

    let words = shlex::split(trimmed).ok_or_else(|| invalid("unbalanced quotes".to_string()))?;
    let Some((cmd, args)) = words.split_first() else {
        return Ok(CliAction::Nothing);
    };

    let command = match cmd.to_ascii_lowercase().as_str() {
        "help" | "?" => return Ok(CliAction::Meta(MetaCommand::Help)),
        "quit" | "exit" => return Ok(CliAction::Meta(MetaCommand::Quit)),
        "create" => {
            arity(cmd, args, 2, 2)?;
            Command::Create {
                repo: args[0].clone(),
                agent: args[1].clone(),
            }
        }
        "transition" => {
            arity(cmd, args, 2, 3)?;
            Command::Transition {
                run: parse_run_ref(&args[0])?,
                to: parse_status(&args[1])?,
                reason: args.get(2).cloned(),
            }
        }
        "usage" => {
            arity(cmd, args, 3, 3)?;
            Command::Usage {
                run: parse_run_ref(&args[0])?,
                tokens: args[1]
                    .parse()
                    .map_err(|_| invalid(format!("invalid token count: {}", args[1])))?,
                cost: args[2]
                    .parse()
                    .map_err(|_| invalid(format!("invalid cost: {}", args[2])))?,
            }
        }
        "event" => {
            arity(cmd, args, 3, usize::MAX)?;
            Command::Event {
                run: parse_run_ref(&args[0])?,
                kind: args[1].parse::<EventKind>().map_err(Error::from)?,
                label: args[2..].join(" "),
            }
        }
        "get" => {
            arity(cmd, args, 1, 1)?;
            Command::Get {
                run: parse_run_ref(&args[0])?,
            }
        }
        "events" => {
            arity(cmd, args, 1, 2)?;
            Command::Events {
                run: parse_run_ref(&args[0])?,
                since: args.get(1).map(|s| parse_since(s)).transpose()?,
            }
        }
        "runs" => {
            arity(cmd, args, 0, 2)?;
            let mut status = None;
            let mut limit = None;
            for arg in args {
                if let Ok(n) = arg.parse::<usize>() {
                    limit = Some(n);
                } else {
                    status = Some(parse_status(arg)?);
                }
            }
            Command::Runs { status, limit }
        }
        "aggregate" => {
            arity(cmd, args, 0, 1)?;
            Command::Aggregate {
                repo: args.first().cloned(),
            }
        }
        "dashboard" => {
            arity(cmd, args, 0, 1)?;
            Command::Dashboard {
                limit: args
                    .first()
                    .map(|s| s.parse().map_err(|_| invalid(format!("invalid limit: {}", s))))
                    .transpose()?,
            }
        }
        other => return Err(invalid(format!("unknown command '{}', try 'help'", other))),
    };

    Ok(CliAction::Execute(command))
}

fn invalid(msg: String) -> Error {
    Error::InvalidInput(msg)
}

fn arity(cmd: &str, args: &[String], min: usize, max: usize) -> Result<()> {
    if args.len() < min || args.len() > max {
        return Err(invalid(format!("wrong number of arguments for '{}'", cmd)));
    }
    Ok(())
}

fn parse_run_ref(s: &str) -> Result<RunRef> {
    if let Some(n) = s.strip_prefix('$') {
        return match n.parse::<usize>() {
            Ok(n) if n > 0 => Ok(RunRef::Index(n)),
            _ => Err(invalid(format!("invalid run reference: {}", s))),
        };
    }
    s.parse::<RunId>()
        .map(RunRef::Id)
        .map_err(|_| invalid(format!("invalid run id: {}", s)))
}

fn parse_status(s: &str) -> Result<RunStatus> {
    Ok(s.parse::<RunStatus>()?)
}

/// `since` accepts RFC 3339 or raw epoch microseconds.
fn parse_since(s: &str) -> Result<Timestamp> {
    if let Ok(micros) = s.parse::<u64>() {
        return Ok(Timestamp::from_micros(micros));
    }
    Timestamp::parse_rfc3339(s).map_err(|_| invalid(format!("invalid timestamp: {}", s)))
}
