use tracing::{debug, warn};

use crate::error::{Result, TaskError};
use crate::id::{IdGenerator, UuidIds};
use crate::model::draft::{Draft, FormMode};
use crate::model::task::{Task, TaskId};
use crate::repository::{InMemoryTaskRepository, TaskRepository};

/// Result of a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
    Added(Task),
    Updated(Task),
}

impl Submitted {
    pub fn task(&self) -> &Task {
        match self {
            Submitted::Added(task) | Submitted::Updated(task) => task,
        }
    }
}

/// The task list plus the form draft that edits it.
///
/// Every mutation goes through `add_task`, `save_task`, `delete_task` or the
/// draft accessors. Failed submissions leave both the list and the draft as
/// they were so the form can be corrected.
pub struct TaskStore<R: TaskRepository = InMemoryTaskRepository, G: IdGenerator = UuidIds> {
    repo: R,
    ids: G,
    draft: Draft,
}

impl TaskStore<InMemoryTaskRepository, UuidIds> {
    pub fn new() -> Self {
        Self::with_parts(InMemoryTaskRepository::new(), UuidIds)
    }
}

impl Default for TaskStore<InMemoryTaskRepository, UuidIds> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: TaskRepository, G: IdGenerator> TaskStore<R, G> {
    pub fn with_parts(repo: R, ids: G) -> Self {
        Self {
            repo,
            ids,
            draft: Draft::default(),
        }
    }

    pub fn tasks(&self) -> Result<Vec<Task>> {
        Ok(self.repo.list()?)
    }

    pub fn find(&self, id: &TaskId) -> Result<Option<Task>> {
        Ok(self.repo.list()?.into_iter().find(|t| t.id == *id))
    }

    pub fn get(&self, id: &TaskId) -> Result<Task> {
        self.find(id)?.ok_or(TaskError::NotFound(*id))
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.repo.list()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Form widgets write field values here.
    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    pub fn is_editing(&self) -> bool {
        self.draft.editing.is_some()
    }

    pub fn add_task(&mut self) -> Result<Task> {
        let valid = self.draft.validate().inspect_err(|e| {
            warn!(missing = ?e.missing, "add rejected");
        })?;

        let task = Task::new(
            self.ids.next_id(),
            valid.name,
            valid.description,
            valid.due_date,
            valid.priority,
        );
        let created = self.repo.create(task)?;
        self.reset_draft();

        debug!(task_id = %created.id, name = %created.name, "task added");
        Ok(created)
    }

    /// Copy an existing task into the draft and switch the form to edit mode.
    pub fn begin_edit(&mut self, id: &TaskId) -> Result<&Draft> {
        let task = self.get(id)?;
        self.draft = Draft::from_task(&task);
        debug!(task_id = %id, "editing");
        Ok(&self.draft)
    }

    pub fn save_task(&mut self) -> Result<Task> {
        let id = self.draft.editing.ok_or(TaskError::NotEditing)?;
        let valid = self.draft.validate().inspect_err(|e| {
            warn!(task_id = %id, missing = ?e.missing, "save rejected");
        })?;

        let mut task = self.get(&id)?;
        task.name = valid.name;
        task.description = valid.description;
        task.due_date = valid.due_date;
        task.priority = valid.priority;

        self.repo.update(&task)?;
        self.reset_draft();

        debug!(task_id = %task.id, "task updated");
        Ok(task)
    }

    /// Add or save depending on whether the draft is editing a task.
    pub fn submit(&mut self) -> Result<Submitted> {
        match self.draft.mode() {
            FormMode::Adding => self.add_task().map(Submitted::Added),
            FormMode::Editing(_) => self.save_task().map(Submitted::Updated),
        }
    }

    /// Remove the task with `id`. Unknown ids are ignored and yield `None`.
    pub fn delete_task(&mut self, id: &TaskId) -> Result<Option<Task>> {
        if self.find(id)?.is_none() {
            warn!(task_id = %id, "delete ignored, no such task");
            return Ok(None);
        }

        let removed = self.repo.delete(id)?;
        if self.draft.editing == Some(*id) {
            self.reset_draft();
        }

        debug!(task_id = %id, "task deleted");
        Ok(Some(removed))
    }

    pub fn reset_draft(&mut self) {
        self.draft = Draft::default();
    }

    pub fn into_repository(self) -> R {
        self.repo
    }
}
