use crate::model::timestamp::display_timestamp;
use serde::Serialize;
use std::fmt;
use time::PrimitiveDateTime;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl Priority {
    /// Maps the word following a `//` marker. Case-sensitive.
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    pub fn storage_tag(self) -> &'static str {
        match self {
            Self::None => "[N]",
            Self::Low => "[L]",
            Self::Medium => "[M]",
            Self::High => "[H]",
        }
    }

    pub fn from_storage_tag(tag: &str) -> Option<Self> {
        match tag {
            "[N]" => Some(Self::None),
            "[L]" => Some(Self::Low),
            "[M]" => Some(Self::Medium),
            "[H]" => Some(Self::High),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskKind {
    Todo,
    Deadline {
        due: PrimitiveDateTime,
    },
    Event {
        start: PrimitiveDateTime,
        end: PrimitiveDateTime,
    },
}

impl TaskKind {
    pub fn symbol(&self) -> char {
        match self {
            Self::Todo => 'T',
            Self::Deadline { .. } => 'D',
            Self::Event { .. } => 'E',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub description: String,
    pub done: bool,
    pub priority: Priority,
    #[serde(flatten)]
    pub kind: TaskKind,
}

impl Task {
    pub fn todo(description: impl Into<String>) -> Self {
        Self::new(description, TaskKind::Todo)
    }

    pub fn deadline(description: impl Into<String>, due: PrimitiveDateTime) -> Self {
        Self::new(description, TaskKind::Deadline { due })
    }

    pub fn event(
        description: impl Into<String>,
        start: PrimitiveDateTime,
        end: PrimitiveDateTime,
    ) -> Self {
        Self::new(description, TaskKind::Event { start, end })
    }

    fn new(description: impl Into<String>, kind: TaskKind) -> Self {
        Self {
            description: description.into(),
            done: false,
            priority: Priority::None,
            kind,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }

    pub fn mark_done(&mut self) {
        self.done = true;
    }

    pub fn mark_undone(&mut self) {
        self.done = false;
    }

    pub fn status_icon(&self) -> char {
        if self.done { 'X' } else { ' ' }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}][{}] {}",
            self.kind.symbol(),
            self.status_icon(),
            self.description
        )?;
        match self.kind {
            TaskKind::Todo => {}
            TaskKind::Deadline { due } => write!(f, " (by: {})", display_timestamp(due))?,
            TaskKind::Event { start, end } => write!(
                f,
                " (from: {} to: {})",
                display_timestamp(start),
                display_timestamp(end)
            )?,
        }
        if self.priority != Priority::None {
            write!(f, " (priority: {})", self.priority)?;
        }
        Ok(())
    }
}
