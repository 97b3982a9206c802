use crate::command::CommandType;
use crate::error::AppError;
use crate::parser::parse_with_aliases;
use crate::storage::TaskStore;
use crate::task_list::TaskList;
use std::collections::HashMap;
use tracing::debug;

/// Reply to one input line, tagged for presentation routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub message: String,
    pub command_type: CommandType,
    pub exit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub message: String,
    pub command_type: CommandType,
}

/// A running session: the task list loaded once at start plus the store it
/// is written back to after every mutation.
pub struct Session<S: TaskStore> {
    tasks: TaskList,
    store: S,
    aliases: HashMap<String, String>,
}

impl<S: TaskStore> Session<S> {
    /// Loads the store. Any error here is meant to end the process.
    pub fn open(store: S) -> Result<Self, AppError> {
        let tasks = TaskList::new(store.load()?);
        Ok(Self {
            tasks,
            store,
            aliases: HashMap::new(),
        })
    }

    pub fn with_aliases(mut self, aliases: HashMap<String, String>) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn handle(&mut self, line: &str) -> Result<Outcome, AppError> {
        let command = parse_with_aliases(line, &self.aliases)?;
        let command_type = command.command_type();
        let message = command.execute(&mut self.tasks, &self.store)?;
        debug!(%command_type, size = self.tasks.len(), "handled command");
        Ok(Outcome {
            message,
            command_type,
        })
    }

    /// Like [`Session::handle`], but folds errors into an `Error` response so
    /// the caller's loop can keep going.
    pub fn respond(&mut self, line: &str) -> Response {
        match self.handle(line) {
            Ok(outcome) => Response {
                exit: outcome.command_type == CommandType::Exit,
                message: outcome.message,
                command_type: outcome.command_type,
            },
            Err(err) => Response {
                message: err.message().to_string(),
                command_type: CommandType::Error,
                exit: false,
            },
        }
    }
}
