use crate::error::TaskError;
use crate::id::IdGenerator;
use crate::model::task::{Task, TaskId};
use crate::repository::TaskRepository;
use crate::service::notification::{Notice, Notifier};
use crate::service::task_store::{Submitted, TaskStore};

pub const ADDED_MESSAGE: &str = "Task added successfully";
pub const UPDATED_MESSAGE: &str = "Task updated successfully";
pub const DELETED_MESSAGE: &str = "Task deleted successfully";

/// Runs store operations on behalf of the form and reports each outcome.
pub struct TaskFormUseCase<'a, R: TaskRepository, G: IdGenerator, N: Notifier> {
    store: &'a mut TaskStore<R, G>,
    notifier: &'a mut N,
}

impl<'a, R: TaskRepository, G: IdGenerator, N: Notifier> TaskFormUseCase<'a, R, G, N> {
    pub fn new(store: &'a mut TaskStore<R, G>, notifier: &'a mut N) -> Self {
        Self { store, notifier }
    }

    pub fn add(&mut self) -> Option<Task> {
        match self.store.add_task() {
            Ok(task) => {
                self.notifier.notify(Notice::success(ADDED_MESSAGE));
                Some(task)
            }
            Err(e) => {
                self.report(e);
                None
            }
        }
    }

    pub fn save(&mut self) -> Option<Task> {
        match self.store.save_task() {
            Ok(task) => {
                self.notifier.notify(Notice::success(UPDATED_MESSAGE));
                Some(task)
            }
            Err(e) => {
                self.report(e);
                None
            }
        }
    }

    /// Add or save, whichever the form is currently set up for.
    pub fn submit(&mut self) -> Option<Submitted> {
        match self.store.submit() {
            Ok(submitted) => {
                let message = match submitted {
                    Submitted::Added(_) => ADDED_MESSAGE,
                    Submitted::Updated(_) => UPDATED_MESSAGE,
                };
                self.notifier.notify(Notice::success(message));
                Some(submitted)
            }
            Err(e) => {
                self.report(e);
                None
            }
        }
    }

    /// Entering edit mode is silent unless the task is gone.
    pub fn begin_edit(&mut self, id: &TaskId) -> bool {
        match self.store.begin_edit(id) {
            Ok(_) => true,
            Err(e) => {
                self.report(e);
                false
            }
        }
    }

    /// Reports success whether or not `id` was present.
    pub fn delete(&mut self, id: &TaskId) -> Option<Task> {
        match self.store.delete_task(id) {
            Ok(removed) => {
                self.notifier.notify(Notice::success(DELETED_MESSAGE));
                removed
            }
            Err(e) => {
                self.report(e);
                None
            }
        }
    }

    pub fn cancel(&mut self) {
        self.store.reset_draft();
    }

    fn report(&mut self, error: TaskError) {
        if let TaskError::Repository(e) = &error {
            tracing::error!(error = %e, "repository failure");
        }
        self.notifier.notify(Notice::error(error.to_string()));
    }
}
