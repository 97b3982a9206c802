use crate::command::Command;
use crate::error::AppError;
use std::collections::HashMap;
use tracing::debug;

pub mod args;

/// Every verb the parser understands.
pub const VERBS: [&str; 9] = [
    "todo", "deadline", "event", "mark", "unmark", "delete", "list", "find", "bye",
];

/// Turns one input line into a validated command.
pub fn parse(line: &str) -> Result<Command, AppError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&verb, rest)) = tokens.split_first() else {
        return Err(AppError::invalid_input("please type a command"));
    };

    let command = match verb {
        "bye" => Command::Exit,
        "list" => Command::List,
        "mark" | "unmark" => Command::Mark {
            position: args::position_arg(verb, rest)?,
            done: verb == "mark",
        },
        "delete" => Command::Delete {
            position: args::position_arg(verb, rest)?,
        },
        "todo" => Command::Add {
            task: args::todo_task(rest)?,
        },
        "deadline" => Command::Add {
            task: args::deadline_task(rest)?,
        },
        "event" => Command::Add {
            task: args::event_task(rest)?,
        },
        "find" => Command::Find {
            query: args::find_query(rest)?,
        },
        other => {
            return Err(AppError::invalid_input(format!(
                "unknown command '{other}', please start with {}",
                allowed_verbs()
            )));
        }
    };

    debug!(verb, command_type = %command.command_type(), "parsed command");
    Ok(command)
}

fn allowed_verbs() -> String {
    let quoted: Vec<String> = VERBS.iter().map(|verb| format!("'{verb}'")).collect();
    match quoted.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} or {last}", rest.join(", ")),
        _ => quoted.join(""),
    }
}

/// Like [`parse`], but first rewrites a leading alias using `aliases`.
pub fn parse_with_aliases(line: &str, aliases: &HashMap<String, String>) -> Result<Command, AppError> {
    let trimmed = line.trim_start();
    let (head, tail) = trimmed
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed, ""));

    match aliases.get(head) {
        Some(expansion) => parse(&format!("{expansion} {tail}")),
        None => parse(line),
    }
}
