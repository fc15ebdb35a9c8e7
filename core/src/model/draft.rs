use chrono::NaiveDate;
use std::fmt;

use crate::error::ValidationError;
use crate::model::task::{Priority, Task, TaskId};

/// Required form fields. Priority always has a value so it never appears here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Description,
    DueDate,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Field::Name => "name",
            Field::Description => "description",
            Field::DueDate => "due date",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Adding,
    Editing(TaskId),
}

/// Transient copy of a task's editable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub name: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    pub editing: Option<TaskId>,
}

/// Field values that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValidDraft {
    pub name: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
}

impl Draft {
    pub fn from_task(task: &Task) -> Self {
        Self {
            name: task.name.clone(),
            description: task.description.clone(),
            due_date: Some(task.due_date),
            priority: task.priority,
            editing: Some(task.id),
        }
    }

    pub fn mode(&self) -> FormMode {
        match self.editing {
            Some(id) => FormMode::Editing(id),
            None => FormMode::Adding,
        }
    }

    pub fn missing_fields(&self) -> Vec<Field> {
        let mut missing = Vec::new();
        if self.name.is_empty() {
            missing.push(Field::Name);
        }
        if self.description.is_empty() {
            missing.push(Field::Description);
        }
        if self.due_date.is_none() {
            missing.push(Field::DueDate);
        }
        missing
    }

    pub(crate) fn validate(&self) -> Result<ValidDraft, ValidationError> {
        match self.due_date {
            Some(due_date) if self.missing_fields().is_empty() => Ok(ValidDraft {
                name: self.name.clone(),
                description: self.description.clone(),
                due_date,
                priority: self.priority,
            }),
            _ => Err(ValidationError::new(self.missing_fields())),
        }
    }
}
