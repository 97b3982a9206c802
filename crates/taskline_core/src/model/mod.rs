mod task;
pub mod timestamp;

pub use task::{Priority, Task, TaskKind};
