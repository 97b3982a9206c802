use crate::error::AppError;
use crate::model::timestamp::{TIMESTAMP_EXAMPLE, TIMESTAMP_PATTERN, parse_timestamp};
use crate::model::{Priority, Task};
use std::num::IntErrorKind;

const PRIORITY_MARKER: &str = "//";

/// Pulls every `//word` token out of `args`. The last annotation wins.
pub fn split_priority<'a>(args: &[&'a str]) -> Result<(Priority, Vec<&'a str>), AppError> {
    let mut priority = Priority::None;
    let mut words = Vec::with_capacity(args.len());

    for &token in args {
        match token.strip_prefix(PRIORITY_MARKER) {
            Some(word) => {
                priority = Priority::from_word(word).ok_or_else(|| {
                    AppError::invalid_input(
                        "please provide a valid priority: '//high', '//medium' or '//low'",
                    )
                })?;
            }
            None => words.push(token),
        }
    }

    Ok((priority, words))
}

pub fn todo_task(args: &[&str]) -> Result<Task, AppError> {
    let (priority, words) = split_priority(args)?;
    if words.is_empty() {
        return Err(AppError::invalid_input(
            "the todo task is blank, please describe the task",
        ));
    }
    Ok(Task::todo(words.join(" ")).with_priority(priority))
}

pub fn deadline_task(args: &[&str]) -> Result<Task, AppError> {
    let (priority, words) = split_priority(args)?;

    let (description, date_text, has_by) = match words.iter().position(|word| *word == "/by") {
        Some(at) => (words[..at].join(" "), words[at + 1..].join(" "), true),
        None => (String::new(), words.join(" "), false),
    };

    let missing_slash_by = !has_by && !date_text.is_empty();
    let missing_date = has_by && !description.is_empty() && date_text.is_empty();
    if missing_slash_by || missing_date {
        return Err(AppError::invalid_input(
            "no deadline date provided, add '/by' followed by the deadline",
        ));
    }
    if description.is_empty() {
        return Err(AppError::invalid_input(
            "the deadline task is blank, please describe the task",
        ));
    }

    let due = parse_timestamp(&date_text).ok_or_else(|| {
        AppError::invalid_input(format!(
            "please provide the deadline in {TIMESTAMP_PATTERN} format, e.g. {TIMESTAMP_EXAMPLE}"
        ))
    })?;

    Ok(Task::deadline(description, due).with_priority(priority))
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum EventSection {
    Description,
    Start,
    End,
}

pub fn event_task(args: &[&str]) -> Result<Task, AppError> {
    if args.is_empty() {
        return Err(blank_event());
    }

    let (priority, words) = split_priority(args)?;

    let mut section = EventSection::Description;
    let mut description = Vec::new();
    let mut start = Vec::new();
    let mut end = Vec::new();

    for word in words {
        match (word, section) {
            ("/from", EventSection::Description) => section = EventSection::Start,
            ("/to", EventSection::Start) => section = EventSection::End,
            ("/to", EventSection::Description) | ("/from", EventSection::End) => {
                return Err(AppError::invalid_input(
                    "/to comes before /from, write the start time before the end time",
                ));
            }
            (_, EventSection::Description) => description.push(word),
            (_, EventSection::Start) => start.push(word),
            (_, EventSection::End) => end.push(word),
        }
    }

    if section == EventSection::Description || start.is_empty() {
        return Err(AppError::invalid_input(
            "no start time provided, add '/from' followed by the start time",
        ));
    }
    if section != EventSection::End || end.is_empty() {
        return Err(AppError::invalid_input(
            "no end time provided, add '/to' followed by the end time",
        ));
    }
    if description.is_empty() {
        return Err(blank_event());
    }

    let format_hint = || {
        AppError::invalid_input(format!(
            "please provide the start and end date and time in {TIMESTAMP_PATTERN} format, e.g. {TIMESTAMP_EXAMPLE}"
        ))
    };
    let start = parse_timestamp(&start.join(" ")).ok_or_else(format_hint)?;
    let end = parse_timestamp(&end.join(" ")).ok_or_else(format_hint)?;
    if end < start {
        return Err(AppError::invalid_input(
            "the event ends before it starts, check the /from and /to times",
        ));
    }

    Ok(Task::event(description.join(" "), start, end).with_priority(priority))
}

fn blank_event() -> AppError {
    AppError::invalid_input("the event task is blank, please describe the task")
}

/// Reads the single numeric position argument of `mark`, `unmark` and
/// `delete`. Range is checked later against the live list.
pub fn position_arg(verb: &str, args: &[&str]) -> Result<i64, AppError> {
    let [token] = args else {
        return Err(AppError::invalid_input(format!(
            "please provide only a number after '{verb}'"
        )));
    };

    token.parse::<i64>().map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => AppError::invalid_input(format!(
            "task {token} does not exist, choose a task number from the list to {verb}"
        )),
        _ => AppError::invalid_input(format!(
            "'{token}' is not a number, give the task number to {verb} as an integer"
        )),
    })
}

pub fn find_query(args: &[&str]) -> Result<String, AppError> {
    if args.is_empty() {
        return Err(AppError::invalid_input(
            "please provide a keyword to find",
        ));
    }
    Ok(args.join(" "))
}
