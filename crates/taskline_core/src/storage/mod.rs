use crate::error::AppError;
use crate::model::Task;
use std::path::PathBuf;

pub mod flat_file;

pub use flat_file::FlatFileStore;

pub const STORE_ENV_VAR: &str = "TASKLINE_STORE_PATH";
const STORE_FILE_NAME: &str = "tasks.txt";

/// Persistence seam for the task list. Every save is a full overwrite.
pub trait TaskStore {
    fn load(&self) -> Result<Vec<Task>, AppError>;

    fn save(&self, tasks: &[Task]) -> Result<(), AppError>;
}

impl<S: TaskStore + ?Sized> TaskStore for &S {
    fn load(&self) -> Result<Vec<Task>, AppError> {
        (**self).load()
    }

    fn save(&self, tasks: &[Task]) -> Result<(), AppError> {
        (**self).save(tasks)
    }
}

pub fn store_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(STORE_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata).join("taskline").join(STORE_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("taskline")
            .join(STORE_FILE_NAME))
    }
}
