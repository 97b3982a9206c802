use crate::error::AppError;
use crate::model::Task;
use crate::storage::TaskStore;
use crate::task_list::TaskList;
use std::fmt;

/// Tag callers use to route a response, e.g. to pick a style in a GUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Exit,
    List,
    Mark,
    Unmark,
    Delete,
    Add,
    Find,
    Error,
}

impl CommandType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exit => "exit",
            Self::List => "list",
            Self::Mark => "mark",
            Self::Unmark => "unmark",
            Self::Delete => "delete",
            Self::Add => "add",
            Self::Find => "find",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    List,
    Mark { position: i64, done: bool },
    Delete { position: i64 },
    Add { task: Task },
    Find { query: String },
}

impl Command {
    pub fn command_type(&self) -> CommandType {
        match self {
            Self::Exit => CommandType::Exit,
            Self::List => CommandType::List,
            Self::Mark { done: true, .. } => CommandType::Mark,
            Self::Mark { done: false, .. } => CommandType::Unmark,
            Self::Delete { .. } => CommandType::Delete,
            Self::Add { .. } => CommandType::Add,
            Self::Find { .. } => CommandType::Find,
        }
    }

    pub fn is_exit(&self) -> bool {
        matches!(self, Self::Exit)
    }

    pub fn execute(self, tasks: &mut TaskList, store: &dyn TaskStore) -> Result<String, AppError> {
        match self {
            Self::Exit => Ok("Bye. Hope to see you again soon!".to_string()),
            Self::List => {
                if tasks.is_empty() {
                    return Ok("Your task list is empty.".to_string());
                }
                Ok(render(
                    "Here are the tasks in your list:",
                    tasks.snapshot(),
                ))
            }
            Self::Mark { position, done } => {
                let task = if done {
                    tasks.mark_at(position, store)?
                } else {
                    tasks.unmark_at(position, store)?
                };
                let header = if done {
                    "Nice! I've marked this task as done:"
                } else {
                    "OK, I've marked this task as not done yet:"
                };
                Ok(format!("{header}\n  {task}"))
            }
            Self::Delete { position } => {
                let removed = tasks.remove_at(position, store)?;
                Ok(format!(
                    "Noted. I've removed this task:\n  {removed}\n{}",
                    size_line(tasks.len())
                ))
            }
            Self::Add { task } => {
                let rendered = task.to_string();
                let size = tasks.add(task, store)?;
                Ok(format!(
                    "Got it. I've added this task:\n  {rendered}\n{}",
                    size_line(size)
                ))
            }
            Self::Find { query } => {
                let mut matches = tasks.find(&query).peekable();
                if matches.peek().is_none() {
                    return Ok(format!("No matching tasks found for \"{query}\"."));
                }
                Ok(render("Here are the matching tasks in your list:", matches))
            }
        }
    }
}

fn size_line(size: usize) -> String {
    format!("Now you have {size} tasks in the list")
}

fn render<'a>(header: &str, rows: impl Iterator<Item = (usize, &'a Task)>) -> String {
    std::iter::once(header.to_string())
        .chain(rows.map(|(position, task)| format!("{position}.{task}")))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::{Command, CommandType};
    use crate::model::Task;
    use crate::parser::parse;
    use crate::storage::testing::MemoryStore;
    use crate::task_list::TaskList;

    fn run(line: &str, tasks: &mut TaskList, store: &MemoryStore) -> Result<String, String> {
        parse(line)
            .and_then(|command| command.execute(tasks, store))
            .map_err(|err| err.message().to_string())
    }

    #[test]
    fn add_reports_new_size() {
        let store = MemoryStore::default();
        let mut tasks = TaskList::default();

        let response = run("todo read book //high", &mut tasks, &store).unwrap();

        assert!(response.starts_with("Got it. I've added this task:"));
        assert!(response.contains("[T][ ] read book (priority: high)"));
        assert!(response.ends_with("Now you have 1 tasks in the list"));
        assert_eq!(store.saved.borrow().len(), 1);
    }

    #[test]
    fn list_renders_one_based_positions() {
        let store = MemoryStore::default();
        let mut tasks = TaskList::new(vec![Task::todo("a"), Task::todo("b").with_done(true)]);

        let response = run("list", &mut tasks, &store).unwrap();

        assert_eq!(
            response,
            "Here are the tasks in your list:\n1.[T][ ] a\n2.[T][X] b"
        );
        assert_eq!(store.saves.get(), 0);
    }

    #[test]
    fn list_of_nothing_says_so() {
        let response = run("list", &mut TaskList::default(), &MemoryStore::default()).unwrap();
        assert_eq!(response, "Your task list is empty.");
    }

    #[test]
    fn mark_out_of_range_leaves_state_unchanged() {
        let store = MemoryStore::default();
        let mut tasks = TaskList::new(vec![Task::todo("read book")]);

        let marked = run("mark 1", &mut tasks, &store).unwrap();
        assert!(marked.contains("[T][X] read book"));
        assert_eq!(store.saves.get(), 1);

        let before = tasks.clone();
        let err = run("mark 5", &mut tasks, &store).unwrap_err();
        assert!(err.contains("does not exist"));
        assert_eq!(tasks, before);
        assert_eq!(store.saves.get(), 1);
    }

    #[test]
    fn index_errors_are_distinguishable() {
        let store = MemoryStore::default();
        let mut tasks = TaskList::new(vec![Task::todo("a"), Task::todo("b")]);

        let messages = [
            run("delete 0", &mut tasks, &store).unwrap_err(),
            run("delete 3", &mut tasks, &store).unwrap_err(),
            run("delete two", &mut tasks, &store).unwrap_err(),
            run("delete 1 2", &mut tasks, &store).unwrap_err(),
        ];

        assert!(messages[0].contains("does not exist"));
        assert!(messages[1].contains("does not exist"));
        assert_ne!(messages[1], messages[2]);
        assert_ne!(messages[1], messages[3]);
        assert_ne!(messages[2], messages[3]);
        assert_eq!(tasks.len(), 2);
    }

    #[test]
    fn delete_reports_removed_task_and_size() {
        let store = MemoryStore::default();
        let mut tasks = TaskList::new(vec![Task::todo("a"), Task::todo("b")]);

        let response = run("delete 1", &mut tasks, &store).unwrap();

        assert_eq!(
            response,
            "Noted. I've removed this task:\n  [T][ ] a\nNow you have 1 tasks in the list"
        );
    }

    #[test]
    fn find_keeps_original_positions() {
        let store = MemoryStore::default();
        let mut tasks = TaskList::new(vec![Task::todo("buy milk"), Task::todo("read book")]);

        let response = run("find book", &mut tasks, &store).unwrap();

        assert_eq!(
            response,
            "Here are the matching tasks in your list:\n2.[T][ ] read book"
        );
    }

    #[test]
    fn find_without_hits_is_explicit() {
        let store = MemoryStore::default();
        let mut tasks = TaskList::new(vec![Task::todo("buy milk")]);

        let response = run("find Milk", &mut tasks, &store).unwrap();

        assert_eq!(response, "No matching tasks found for \"Milk\".");
    }

    #[test]
    fn exit_has_no_effect_on_tasks() {
        let store = MemoryStore::default();
        let mut tasks = TaskList::new(vec![Task::todo("a")]);
        let command = parse("bye").unwrap();

        assert!(command.is_exit());
        assert_eq!(command.command_type(), CommandType::Exit);
        command.execute(&mut tasks, &store).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(store.saves.get(), 0);
    }

    #[test]
    fn storage_failure_surfaces_after_mutation() {
        let store = MemoryStore::default();
        store.fail.set(true);
        let mut tasks = TaskList::default();

        let err = Command::Add {
            task: Task::todo("a"),
        }
        .execute(&mut tasks, &store)
        .unwrap_err();

        assert!(err.is_storage());
        assert_eq!(tasks.len(), 1);
    }
}
