//! Line-oriented task file.
//!
//! ```text
//! [T][ ] [H] read book
//! [D][X] [N] submit report 2024-05-19 1800
//! [E][ ] [M] team meeting 2024-05-19 1400 2024-05-19 1600
//! ```
//!
//! Timestamps are taken from the end of the line, so a description may hold
//! any tokens.

use crate::error::AppError;
use crate::model::timestamp::{format_timestamp, parse_timestamp};
use crate::model::{Priority, Task, TaskKind};
use crate::storage::TaskStore;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use time::PrimitiveDateTime;
use tracing::{debug, info};

const MARKER_LEN: usize = "[T][ ]".len();

pub struct FlatFileStore {
    path: PathBuf,
}

impl FlatFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates an empty store file unless one already exists.
    pub fn create_if_missing(&self) -> Result<bool, AppError> {
        if self.path.exists() {
            return Ok(false);
        }
        write_atomically(&self.path, "")?;
        info!(path = %self.path.display(), "created empty task file");
        Ok(true)
    }
}

impl TaskStore for FlatFileStore {
    fn load(&self) -> Result<Vec<Task>, AppError> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|err| AppError::io(format!("{}: {}", self.path.display(), err)))?;

        let mut tasks = Vec::new();
        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let task = decode_line(line).map_err(|err| {
                AppError::invalid_data(format!(
                    "{} line {}: {}",
                    self.path.display(),
                    index + 1,
                    err.message()
                ))
            })?;
            tasks.push(task);
        }

        info!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    fn save(&self, tasks: &[Task]) -> Result<(), AppError> {
        let mut content = String::new();
        for task in tasks {
            content.push_str(&encode_line(task));
            content.push('\n');
        }
        write_atomically(&self.path, &content)?;
        debug!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }
}

fn write_atomically(path: &Path, content: &str) -> Result<(), AppError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|err| AppError::io(err.to_string()))?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(|err| AppError::io(err.to_string()))?;
    tmp.write_all(content.as_bytes())
        .map_err(|err| AppError::io(err.to_string()))?;
    tmp.flush().map_err(|err| AppError::io(err.to_string()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(tmp.path(), permissions)
            .map_err(|err| AppError::io(err.to_string()))?;
    }

    tmp.persist(path)
        .map_err(|err| AppError::io(format!("{}: {}", path.display(), err.error)))?;
    Ok(())
}

pub fn encode_line(task: &Task) -> String {
    let mut line = format!(
        "[{}][{}] {} {}",
        task.kind.symbol(),
        task.status_icon(),
        task.priority.storage_tag(),
        task.description
    );
    match task.kind {
        TaskKind::Todo => {}
        TaskKind::Deadline { due } => {
            line.push(' ');
            line.push_str(&format_timestamp(due));
        }
        TaskKind::Event { start, end } => {
            line.push(' ');
            line.push_str(&format_timestamp(start));
            line.push(' ');
            line.push_str(&format_timestamp(end));
        }
    }
    line
}

pub fn decode_line(line: &str) -> Result<Task, AppError> {
    let (marker, rest) = match (line.get(..MARKER_LEN), line.get(MARKER_LEN..)) {
        (Some(marker), Some(rest)) => (marker, rest),
        _ => return Err(unknown_marker(line)),
    };

    let (symbol, done) = match marker {
        "[T][ ]" => ('T', false),
        "[T][X]" => ('T', true),
        "[D][ ]" => ('D', false),
        "[D][X]" => ('D', true),
        "[E][ ]" => ('E', false),
        "[E][X]" => ('E', true),
        _ => return Err(unknown_marker(line)),
    };

    let mut tokens: Vec<&str> = rest.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(AppError::invalid_data("missing priority tag"));
    }
    let tag = tokens.remove(0);
    let priority = Priority::from_storage_tag(tag)
        .ok_or_else(|| AppError::invalid_data(format!("unknown priority tag '{tag}'")))?;

    let kind = match symbol {
        'T' => TaskKind::Todo,
        'D' => {
            let due = take_trailing_timestamp(&mut tokens, "due")?;
            TaskKind::Deadline { due }
        }
        _ => {
            let end = take_trailing_timestamp(&mut tokens, "end")?;
            let start = take_trailing_timestamp(&mut tokens, "start")?;
            if end < start {
                return Err(AppError::invalid_data("event ends before it starts"));
            }
            TaskKind::Event { start, end }
        }
    };

    if tokens.is_empty() {
        return Err(AppError::invalid_data("missing description"));
    }

    Ok(Task {
        description: tokens.join(" "),
        done,
        priority,
        kind,
    })
}

fn take_trailing_timestamp(
    tokens: &mut Vec<&str>,
    field: &str,
) -> Result<PrimitiveDateTime, AppError> {
    if tokens.len() < 2 {
        return Err(AppError::invalid_data(format!("missing {field} timestamp")));
    }
    let split = tokens.len() - 2;
    let text = tokens[split..].join(" ");
    let value = parse_timestamp(&text)
        .ok_or_else(|| AppError::invalid_data(format!("invalid {field} timestamp '{text}'")))?;
    tokens.truncate(split);
    Ok(value)
}

fn unknown_marker(line: &str) -> AppError {
    let marker: String = line.chars().take(MARKER_LEN).collect();
    AppError::invalid_data(format!("unrecognised task marker '{marker}'"))
}
