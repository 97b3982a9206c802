use crate::error::AppError;
use crate::model::Task;
use crate::storage::TaskStore;
use tracing::warn;

/// Ordered task collection addressed by 1-based positions.
///
/// Mutators apply the in-memory change first and then write the whole list
/// through the store. A failed write is reported as a storage error and the
/// in-memory change is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, position: usize) -> Option<&Task> {
        position.checked_sub(1).and_then(|index| self.tasks.get(index))
    }

    /// `(position, task)` pairs in list order.
    pub fn snapshot(&self) -> impl Iterator<Item = (usize, &Task)> {
        self.tasks
            .iter()
            .enumerate()
            .map(|(index, task)| (index + 1, task))
    }

    /// Case-sensitive substring search over descriptions, keeping positions.
    pub fn find<'a>(&'a self, query: &'a str) -> impl Iterator<Item = (usize, &'a Task)> {
        self.snapshot()
            .filter(move |(_, task)| task.description.contains(query))
    }

    /// Converts a user position into a vector index, rejecting anything
    /// outside `1..=len`.
    pub fn index_for(&self, position: i64, verb: &str) -> Result<usize, AppError> {
        if self.tasks.is_empty() {
            return Err(AppError::invalid_input(format!(
                "there are no tasks to {verb} yet"
            )));
        }
        usize::try_from(position)
            .ok()
            .filter(|position| (1..=self.tasks.len()).contains(position))
            .map(|position| position - 1)
            .ok_or_else(|| {
                AppError::invalid_input(format!(
                    "task {position} does not exist, choose a task number from 1 to {} to {verb}",
                    self.tasks.len()
                ))
            })
    }

    pub fn add(&mut self, task: Task, store: &dyn TaskStore) -> Result<usize, AppError> {
        self.tasks.push(task);
        self.persist(store)?;
        Ok(self.tasks.len())
    }

    pub fn remove_at(&mut self, position: i64, store: &dyn TaskStore) -> Result<Task, AppError> {
        let index = self.index_for(position, "delete")?;
        let removed = self.tasks.remove(index);
        self.persist(store)?;
        Ok(removed)
    }

    pub fn mark_at(&mut self, position: i64, store: &dyn TaskStore) -> Result<Task, AppError> {
        self.set_done_at(position, true, store)
    }

    pub fn unmark_at(&mut self, position: i64, store: &dyn TaskStore) -> Result<Task, AppError> {
        self.set_done_at(position, false, store)
    }

    fn set_done_at(
        &mut self,
        position: i64,
        done: bool,
        store: &dyn TaskStore,
    ) -> Result<Task, AppError> {
        let verb = if done { "mark" } else { "unmark" };
        let index = self.index_for(position, verb)?;
        let task = &mut self.tasks[index];
        if done {
            task.mark_done();
        } else {
            task.mark_undone();
        }
        let updated = task.clone();
        self.persist(store)?;
        Ok(updated)
    }

    fn persist(&self, store: &dyn TaskStore) -> Result<(), AppError> {
        store.save(&self.tasks).inspect_err(|err| {
            warn!(error = %err, "task list changed in memory but could not be saved");
        })
    }
}
